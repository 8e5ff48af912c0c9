use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
  #[error("Failed to parse {filename}, got: {messages:?}")]
  Parse { filename: String, messages: Vec<String> },

  #[error("Semantic analysis of {filename} failed, got: {messages:?}")]
  Semantic { filename: String, messages: Vec<String> },

  /// An import/export shape that cannot be expressed as a registration.
  /// Dropping it silently would lose exports.
  #[error("Unsupported export form: {form}")]
  UnsupportedExportForm { form: String },

  #[error("{filename} is a CommonJS file, only ES modules can be registered")]
  NotAModule { filename: String },
}
