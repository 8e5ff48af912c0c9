use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
  pub code: String,
  pub module_name: Option<String>,
  /// Dependency sources, index-aligned with the emitted setters.
  pub dependencies: Vec<String>,
  /// Names exported through `(name, value)` calls or named re-exports. Names reaching the module
  /// through `export *` are only known at runtime and are not listed.
  pub exported_names: Vec<String>,
}

impl TransformOutput {
  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }
}
