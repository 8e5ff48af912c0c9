mod transform_error;

use std::{
  fmt::Display,
  ops::{Deref, DerefMut},
};

pub use crate::transform_error::TransformError;

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Returns the first error that is a [`TransformError`], if any.
  pub fn transform_error(&self) -> Option<&TransformError> {
    self.0.iter().find_map(|error| error.downcast_ref::<TransformError>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (i, error) in self.0.iter().enumerate() {
      if i > 0 {
        writeln!(f)?;
      }
      write!(f, "{error}")?;
    }
    Ok(())
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<TransformError> for BuildError {
  fn from(error: TransformError) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_build_error_display_joins_lines() {
  let error = BuildError::from(vec![anyhow::anyhow!("first"), anyhow::anyhow!("second")]);
  assert_eq!(error.to_string(), "first\nsecond");
  assert_eq!(error.len(), 2);
}

#[test]
fn test_transform_error_is_recoverable_from_build_error() {
  let error = BuildError::from(TransformError::UnsupportedExportForm { form: "export =".into() });
  assert!(matches!(
    error.transform_error(),
    Some(TransformError::UnsupportedExportForm { form }) if form == "export ="
  ));
}
