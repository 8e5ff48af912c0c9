use oxc::{
  allocator::Vec as ArenaVec,
  ast::{
    NONE,
    ast::{Argument, Directive, Expression, Statement},
  },
  span::SPAN,
};
use sysreg_common::DependencyTable;
use sysreg_ecmascript::AstSnippet;

/// Everything the registration call is built from.
pub struct RegistrationParts<'me, 'ast> {
  pub module_name: Option<&'me str>,
  pub dependencies: &'me DependencyTable,
  /// Index-aligned with `dependencies`.
  pub setters: ArenaVec<'ast, Expression<'ast>>,
  pub directives: ArenaVec<'ast, Directive<'ast>>,
  pub before_body: ArenaVec<'ast, Statement<'ast>>,
  pub body: ArenaVec<'ast, Statement<'ast>>,
}

/// ```js
/// System.register("name", ["a", "b"], function (_export) {
///   "use strict";
///   ...before_body
///   return {
///     setters: [function (_a) {}, function (_b) {}],
///     execute: function () { ...body }
///   };
/// });
/// ```
pub struct RegistrationAssembler<'me, 'ast> {
  snippet: &'me AstSnippet<'ast>,
  export_ident: &'me str,
  system_global: &'me str,
  strict_mode: bool,
}

impl<'me, 'ast> RegistrationAssembler<'me, 'ast> {
  pub fn new(
    snippet: &'me AstSnippet<'ast>,
    export_ident: &'me str,
    system_global: &'me str,
    strict_mode: bool,
  ) -> Self {
    Self { snippet, export_ident, system_global, strict_mode }
  }

  pub fn assemble(&self, parts: RegistrationParts<'_, 'ast>) -> Statement<'ast> {
    let RegistrationParts { module_name, dependencies, setters, directives, before_body, body } =
      parts;
    let snippet = self.snippet;

    let mut arguments = snippet.builder.vec_with_capacity(3);
    if let Some(module_name) = module_name {
      arguments.push(Argument::from(snippet.string_literal_expr(module_name, SPAN)));
    }
    arguments.push(Argument::from(snippet.array_expr(
      dependencies.sources().map(|source| snippet.string_literal_expr(source, SPAN)),
    )));

    let mut factory_body = before_body;
    factory_body.push(snippet.return_stmt(snippet.object_expr([
      ("setters", snippet.array_expr(setters)),
      ("execute", snippet.function_expr(&[], snippet.builder.vec(), body)),
    ])));
    let directives = self.factory_directives(directives);
    let factory = snippet.function_expr(&[self.export_ident], directives, factory_body);
    arguments.push(Argument::from(factory));

    let register_call =
      snippet.builder.expression_call(SPAN, self.register_callee(), NONE, arguments, false);
    snippet.expr_stmt(register_call)
  }

  /// `System.register`, or `a.b.register` for `system_global = "a.b"`.
  fn register_callee(&self) -> Expression<'ast> {
    let mut segments = self.system_global.split('.');
    let root = segments.next().unwrap_or("System");
    let mut path: Vec<&str> = segments.collect();
    path.push("register");
    self.snippet.static_member_chain_expr(root, &path)
  }

  fn factory_directives(
    &self,
    original: ArenaVec<'ast, Directive<'ast>>,
  ) -> ArenaVec<'ast, Directive<'ast>> {
    let mut directives = self.snippet.builder.vec_with_capacity(original.len() + 1);
    if self.strict_mode {
      directives.push(self.snippet.directive("use strict"));
    }
    directives.extend(original.into_iter().filter(|directive| !directive.is_use_strict()));
    directives
  }
}
