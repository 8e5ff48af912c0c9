use std::{fmt::Debug, sync::Arc};

type ResolveFn = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Last word on a derived module name. Receives the derived name and may replace it; returning
/// `None` keeps the derived name.
#[derive(Clone)]
pub struct ModuleIdResolver(Arc<ResolveFn>);

impl ModuleIdResolver {
  pub fn new(resolve: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
    Self(Arc::new(resolve))
  }

  pub fn resolve(&self, module_name: &str) -> Option<String> {
    (self.0)(module_name)
  }
}

impl Debug for ModuleIdResolver {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("ModuleIdResolver(..)")
  }
}
