use std::path::Path;

use arcstr::ArcStr;
use oxc::{
  semantic::{Scoping, SemanticBuilder},
  span::SourceType,
};
use sysreg_ecmascript::{EcmaAst, EcmaCompiler};
use sysreg_error::{BuildResult, TransformError};

/// Parse `source` as an ES module and resolve its scopes.
///
/// `.ts`/`.mts`/`.tsx` files parse as TypeScript modules. Type annotations are printed back
/// unchanged.
pub fn parse_to_ecma_ast(
  filename: &str,
  source: impl Into<ArcStr>,
) -> BuildResult<(EcmaAst, Scoping)> {
  let source_type = match Path::new(filename).extension().and_then(|ext| ext.to_str()) {
    Some("cjs" | "cts") => {
      return Err(TransformError::NotAModule { filename: filename.to_string() }.into());
    }
    Some("ts" | "mts") => SourceType::ts(),
    Some("tsx") => SourceType::tsx(),
    _ => SourceType::mjs(),
  };

  let mut ast = EcmaCompiler::parse(filename, source, source_type)?;

  let scoping = ast.with_mut(|fields| {
    let semantic_ret = SemanticBuilder::new().build(fields.program);
    if semantic_ret.errors.is_empty() {
      Ok(semantic_ret.semantic.into_scoping())
    } else {
      Err(semantic_ret.errors.iter().map(|error| error.message.to_string()).collect::<Vec<_>>())
    }
  });

  let scoping = scoping
    .map_err(|messages| TransformError::Semantic { filename: filename.to_string(), messages })?;
  Ok((ast, scoping))
}

#[test]
fn rejects_commonjs_files() {
  let error = parse_to_ecma_ast("a.cjs", "module.exports = 1").unwrap_err();
  assert!(matches!(error.transform_error(), Some(TransformError::NotAModule { .. })));
}

#[test]
fn rejects_commonjs_typescript_files() {
  let error = parse_to_ecma_ast("a.cts", "export = 1").unwrap_err();
  assert!(matches!(error.transform_error(), Some(TransformError::NotAModule { .. })));
}

#[test]
fn typescript_files_parse_with_types() {
  let (ast, _) = parse_to_ecma_ast("a.ts", "export const n: number = 1;").unwrap();
  assert!(ast.program().source_type.is_typescript());
}

#[test]
fn resolves_root_bindings() {
  let (_, scoping) = parse_to_ecma_ast("a.js", "import { x } from 'm'; var y = x;").unwrap();
  assert!(scoping.get_root_binding("x").is_some());
  assert!(scoping.get_root_binding("y").is_some());
}
