use std::path::PathBuf;

use sysreg_common::{NormalizedTransformOptions, TransformOptions};

pub fn normalize_options(raw_options: TransformOptions) -> NormalizedTransformOptions {
  // `moduleId` implies `moduleIds`.
  let module_ids = raw_options.module_ids.unwrap_or(false) || raw_options.module_id.is_some();

  NormalizedTransformOptions {
    cwd: raw_options
      .cwd
      .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))),
    module_ids,
    module_id: raw_options.module_id,
    module_root: raw_options.module_root,
    source_root: raw_options.source_root,
    keep_module_id_extensions: raw_options.keep_module_id_extensions.unwrap_or(false),
    get_module_id: raw_options.get_module_id,
    system_global: raw_options.system_global.unwrap_or_else(|| "System".to_string()),
    strict_mode: raw_options.strict_mode.unwrap_or(true),
  }
}

#[test]
fn defaults() {
  let options = normalize_options(TransformOptions::default());
  assert!(!options.module_ids);
  assert_eq!(options.system_global, "System");
  assert!(options.strict_mode);

  let options =
    normalize_options(TransformOptions { module_id: Some("app".into()), ..Default::default() });
  assert!(options.module_ids);
}
