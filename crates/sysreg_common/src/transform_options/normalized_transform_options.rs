use std::path::PathBuf;

use super::module_id_resolver::ModuleIdResolver;

#[derive(Debug)]
pub struct NormalizedTransformOptions {
  // --- Module naming
  pub cwd: PathBuf,
  pub module_ids: bool,
  pub module_id: Option<String>,
  pub module_root: Option<String>,
  pub source_root: Option<String>,
  pub keep_module_id_extensions: bool,
  pub get_module_id: Option<ModuleIdResolver>,

  // --- Output
  pub system_global: String,
  pub strict_mode: bool,
}
