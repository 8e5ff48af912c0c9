use arcstr::ArcStr;
use oxc::{
  ast::ast::{Expression, Statement},
  span::SPAN,
};
use sysreg_ecmascript::AstSnippet;
use sysreg_utils::collections::FxIndexSet;

/// Builds calls into the module's export channel, the `_export` parameter of the factory.
#[derive(Clone, Copy)]
pub struct ExportCall<'me, 'ast> {
  snippet: &'me AstSnippet<'ast>,
  export_ident: &'me str,
}

impl<'me, 'ast> ExportCall<'me, 'ast> {
  pub fn new(snippet: &'me AstSnippet<'ast>, export_ident: &'me str) -> Self {
    Self { snippet, export_ident }
  }

  /// `_export("name", value)`, which evaluates to `value`.
  pub fn expr(&self, name: &str, value: Expression<'ast>) -> Expression<'ast> {
    self.snippet.call_expr_with_2arg_expr(
      self.snippet.id_ref_expr(self.export_ident, SPAN),
      self.snippet.string_literal_expr(name, SPAN),
      value,
    )
  }

  /// `_export("name", value);`
  pub fn stmt(&self, name: &str, value: Expression<'ast>) -> Statement<'ast> {
    self.snippet.expr_stmt(self.expr(name, value))
  }

  /// `_export(object);`
  pub fn bulk_stmt(&self, object: Expression<'ast>) -> Statement<'ast> {
    self.snippet.expr_stmt(
      self
        .snippet
        .call_expr_with_arg_expr(self.snippet.id_ref_expr(self.export_ident, SPAN), object),
    )
  }

  /// Passes `value` through one export call per alias. The first alias ends up outermost:
  /// `["x", "y"]` gives `_export("x", _export("y", value))`.
  pub fn wrap_aliases(
    &self,
    aliases: &FxIndexSet<ArcStr>,
    value: Expression<'ast>,
  ) -> Expression<'ast> {
    aliases.iter().rev().fold(value, |node, alias| self.expr(alias, node))
  }
}

#[cfg(test)]
mod tests {
  use oxc::span::SourceType;
  use sysreg_ecmascript::EcmaCompiler;

  use super::*;

  fn print_stmt(build: impl for<'a> FnOnce(&AstSnippet<'a>) -> Statement<'a>) -> String {
    let mut ast = EcmaCompiler::parse("test.js", "", SourceType::cjs()).unwrap();
    ast.with_mut(|fields| {
      let snippet = AstSnippet::new(fields.allocator);
      let stmt = build(&snippet);
      fields.program.body.push(stmt);
    });
    EcmaCompiler::print(&ast)
  }

  #[test]
  fn aliases_nest_first_outermost() {
    let printed = print_stmt(|snippet| {
      let aliases = FxIndexSet::from_iter([ArcStr::from("x"), ArcStr::from("y")]);
      let export_call = ExportCall::new(snippet, "_export");
      snippet.expr_stmt(export_call.wrap_aliases(&aliases, snippet.id_ref_expr("a", SPAN)))
    });
    let expected = EcmaCompiler::normalize_script(r#"_export("x", _export("y", a));"#).unwrap();
    assert_eq!(printed, expected);
  }

  #[test]
  fn bulk_export_passes_the_object() {
    let printed = print_stmt(|snippet| {
      ExportCall::new(snippet, "_export2").bulk_stmt(snippet.id_ref_expr("o", SPAN))
    });
    assert_eq!(printed, EcmaCompiler::normalize_script("_export2(o);").unwrap());
  }
}
