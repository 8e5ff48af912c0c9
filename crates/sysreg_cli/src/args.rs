use std::path::PathBuf;

use clap::Args;
use sysreg::TransformOptions;

#[derive(Args)]
pub struct InputArgs {
  /// ES module files to register.
  #[clap(required = true)]
  pub inputs: Vec<PathBuf>,

  #[clap(long)]
  pub cwd: Option<PathBuf>,

  /// JSON file with transform options. Flags given on the command line win.
  #[clap(long, short = 'c')]
  pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct OutputArgs {
  /// Write every result to `<DIR>/<input path relative to --cwd>` instead of stdout.
  #[clap(long, short = 'd')]
  pub out_dir: Option<PathBuf>,

  /// Without `--out-dir`, print the registration metadata as JSON instead of the code.
  #[clap(long)]
  pub json: bool,

  #[clap(long, short = 's')]
  pub silent: bool,

  /// Emit tracing events as JSON on stderr.
  #[clap(long)]
  pub trace: bool,
}

#[derive(Args)]
pub struct RegisterArgs {
  #[clap(long)]
  pub module_ids: bool,

  #[clap(long)]
  pub module_id: Option<String>,

  #[clap(long)]
  pub module_root: Option<String>,

  #[clap(long)]
  pub source_root: Option<String>,

  #[clap(long)]
  pub keep_module_id_extensions: bool,

  /// Object whose `register` method is called.
  #[clap(long)]
  pub system_global: Option<String>,

  /// Do not emit "use strict" in the factory.
  #[clap(long)]
  pub no_strict: bool,
}

impl RegisterArgs {
  /// Switches that are off stay unset, so a config file can still turn them on.
  pub fn into_options(self, cwd: Option<PathBuf>) -> TransformOptions {
    TransformOptions {
      cwd,
      module_ids: self.module_ids.then_some(true),
      module_id: self.module_id,
      module_root: self.module_root,
      source_root: self.source_root,
      keep_module_id_extensions: self.keep_module_id_extensions.then_some(true),
      get_module_id: None,
      system_global: self.system_global,
      strict_mode: self.no_strict.then_some(false),
    }
  }
}
