use std::sync::Arc;

use arcstr::ArcStr;
use sysreg_common::{TransformOptions, TransformOutput};
use sysreg_ecmascript::EcmaCompiler;
use sysreg_error::BuildResult;

use crate::{
  SharedOptions,
  register::{RegisteredModule, register_module},
  utils::{
    module_naming::ModuleNaming, normalize_options::normalize_options,
    parse_to_ecma_ast::parse_to_ecma_ast,
  },
};

/// Entry point: one instance can transform any number of modules, from any number of threads.
/// Every call owns its allocator and naming context, so nothing is shared between modules.
#[derive(Debug, Clone)]
pub struct RegisterTransformer {
  options: SharedOptions,
}

impl RegisterTransformer {
  pub fn new(options: TransformOptions) -> Self {
    Self { options: Arc::new(normalize_options(options)) }
  }

  pub fn transform(
    &self,
    source: impl Into<ArcStr>,
    filename: &str,
  ) -> BuildResult<TransformOutput> {
    let _span = tracing::debug_span!("transform_module", filename).entered();

    let (mut ast, scoping) = parse_to_ecma_ast(filename, source)?;
    let module_name = ModuleNaming::new(&self.options).module_name(filename);
    tracing::trace!(?module_name, "resolved module name");

    let RegisteredModule { dependencies, exported_names } =
      register_module(&mut ast, &scoping, module_name.as_deref(), &self.options)?;

    let code = EcmaCompiler::print(&ast);
    Ok(TransformOutput { code, module_name, dependencies, exported_names })
  }
}
