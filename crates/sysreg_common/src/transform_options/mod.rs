pub mod module_id_resolver;
pub mod normalized_transform_options;

use std::path::PathBuf;

use serde::Deserialize;

use self::module_id_resolver::ModuleIdResolver;

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransformOptions {
  // --- Module naming
  pub cwd: Option<PathBuf>,
  pub module_ids: Option<bool>,
  pub module_id: Option<String>,
  pub module_root: Option<String>,
  pub source_root: Option<String>,
  pub keep_module_id_extensions: Option<bool>,
  #[serde(skip)]
  pub get_module_id: Option<ModuleIdResolver>,

  // --- Output
  pub system_global: Option<String>,
  pub strict_mode: Option<bool>,
}

impl TransformOptions {
  pub fn from_json(json: &str) -> serde_json::Result<Self> {
    serde_json::from_str(json)
  }

  /// Fills every field that is unset in `self` from `fallback`.
  pub fn merge(self, fallback: Self) -> Self {
    Self {
      cwd: self.cwd.or(fallback.cwd),
      module_ids: self.module_ids.or(fallback.module_ids),
      module_id: self.module_id.or(fallback.module_id),
      module_root: self.module_root.or(fallback.module_root),
      source_root: self.source_root.or(fallback.source_root),
      keep_module_id_extensions: self
        .keep_module_id_extensions
        .or(fallback.keep_module_id_extensions),
      get_module_id: self.get_module_id.or(fallback.get_module_id),
      system_global: self.system_global.or(fallback.system_global),
      strict_mode: self.strict_mode.or(fallback.strict_mode),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserialize_camel_case_keys() {
    let options = TransformOptions::from_json(
      r#"{ "moduleIds": true, "moduleRoot": "app", "keepModuleIdExtensions": false }"#,
    )
    .unwrap();
    assert_eq!(options.module_ids, Some(true));
    assert_eq!(options.module_root.as_deref(), Some("app"));
    assert_eq!(options.keep_module_id_extensions, Some(false));
    assert!(options.system_global.is_none());
  }

  #[test]
  fn unknown_keys_are_rejected() {
    assert!(TransformOptions::from_json(r#"{ "moduleID": "a" }"#).is_err());
  }

  #[test]
  fn merge_prefers_self() {
    let cli = TransformOptions { system_global: Some("SystemJS".into()), ..Default::default() };
    let file = TransformOptions {
      system_global: Some("System".into()),
      strict_mode: Some(false),
      ..Default::default()
    };
    let merged = cli.merge(file);
    assert_eq!(merged.system_global.as_deref(), Some("SystemJS"));
    assert_eq!(merged.strict_mode, Some(false));
  }
}
