use oxc::{
  allocator::Vec as ArenaVec,
  ast::ast::{BinaryOperator, Expression, LogicalOperator, Statement, VariableDeclarationKind},
  span::SPAN,
};
use sysreg_common::{DependencyEntry, DependencyTable, Specifier};
use sysreg_ecmascript::AstSnippet;
use sysreg_error::{BuildResult, TransformError};
use sysreg_utils::option_ext::OptionExt;

use super::export_call::ExportCall;
use crate::utils::naming_context::NamingContext;

/// Builds one setter per dependency, index-aligned with the dependency table.
///
/// ```js
/// function (_dep) {
///   a = _dep.a;
///   ns = _dep;
///   var _exportObj = {};
///   for (var _key in _dep) { ... }
///   _exportObj.b = _dep.b;
///   _export(_exportObj);
/// }
/// ```
///
/// A setter only overwrites bindings and exports, so calling it again is harmless.
pub struct SetterSynthesizer<'me, 'ast> {
  snippet: &'me AstSnippet<'ast>,
  export_call: ExportCall<'me, 'ast>,
  naming: &'me mut NamingContext,
}

impl<'me, 'ast> SetterSynthesizer<'me, 'ast> {
  pub fn new(
    snippet: &'me AstSnippet<'ast>,
    export_call: ExportCall<'me, 'ast>,
    naming: &'me mut NamingContext,
  ) -> Self {
    Self { snippet, export_call, naming }
  }

  pub fn synthesize(
    &mut self,
    dependencies: &DependencyTable,
  ) -> BuildResult<ArenaVec<'ast, Expression<'ast>>> {
    let mut setters = self.snippet.builder.vec_with_capacity(dependencies.iter().len());
    for entry in dependencies.iter() {
      setters.push(self.setter_for(entry)?);
    }
    Ok(setters)
  }

  fn setter_for(&mut self, entry: &DependencyEntry) -> BuildResult<Expression<'ast>> {
    let target = self.naming.generate_uid(&entry.source);
    let mut body = self.snippet.builder.vec();

    for specifier in &entry.imports {
      let value = match specifier {
        Specifier::Namespace { .. } => self.snippet.id_ref_expr(&target, SPAN),
        Specifier::Named { .. } | Specifier::Default { .. } => self.snippet.member_expr_expr(
          self.snippet.id_ref_expr(&target, SPAN),
          specifier.imported_name().unpack(),
        ),
        Specifier::WildcardReexport => {
          return Err(unsupported("`export *` recorded as an import"));
        }
      };
      body.push(self.snippet.id_assign_stmt(specifier.local().unpack(), value));
    }

    if entry.has_reexports() {
      let export_obj = self.naming.generate_uid("exportObj");
      body.push(self.snippet.var_decl_stmt(&export_obj, self.snippet.empty_object_expr()));

      for specifier in &entry.exports {
        match specifier {
          Specifier::WildcardReexport => {
            let key = self.naming.generate_uid("key");
            body.push(self.copy_own_keys_stmt(&key, &export_obj, &target));
          }
          // export { local as external } from 'x'
          Specifier::Named { local, external } => {
            let value =
              self.snippet.member_expr_expr(self.snippet.id_ref_expr(&target, SPAN), local);
            body.push(self.assign_export_obj_stmt(&export_obj, external, value));
          }
          // export * as local from 'x'
          Specifier::Namespace { local } => {
            let value = self.snippet.id_ref_expr(&target, SPAN);
            body.push(self.assign_export_obj_stmt(&export_obj, local, value));
          }
          Specifier::Default { .. } => {
            return Err(unsupported("default specifier in a re-export list"));
          }
        }
      }

      body.push(self.export_call.bulk_stmt(self.snippet.id_ref_expr(&export_obj, SPAN)));
    }

    Ok(self.snippet.function_expr(&[&target], self.snippet.builder.vec(), body))
  }

  /// `_exportObj.name = value;`
  fn assign_export_obj_stmt(
    &self,
    export_obj: &str,
    name: &str,
    value: Expression<'ast>,
  ) -> Statement<'ast> {
    let member = self.snippet.member_expr(self.snippet.id_ref_expr(export_obj, SPAN), name);
    self.snippet.expr_stmt(
      self.snippet.assign_expr(self.snippet.member_assignment_target(member), value),
    )
  }

  /// ```js
  /// for (var _key in _dep) {
  ///   if (_key !== "default" && Object.prototype.hasOwnProperty.call(_dep, _key))
  ///     _exportObj[_key] = _dep[_key];
  /// }
  /// ```
  fn copy_own_keys_stmt(&self, key: &str, export_obj: &str, target: &str) -> Statement<'ast> {
    let snippet = self.snippet;
    let builder = &snippet.builder;

    let is_not_default = builder.expression_binary(
      SPAN,
      snippet.id_ref_expr(key, SPAN),
      BinaryOperator::StrictInequality,
      snippet.string_literal_expr("default", SPAN),
    );
    let is_own = snippet.call_expr_with_2arg_expr(
      snippet.static_member_chain_expr("Object", &["prototype", "hasOwnProperty", "call"]),
      snippet.id_ref_expr(target, SPAN),
      snippet.id_ref_expr(key, SPAN),
    );
    let test = builder.expression_logical(SPAN, is_not_default, LogicalOperator::And, is_own);

    let read = |object: &str| {
      let property = snippet.id_ref_expr(key, SPAN);
      snippet.computed_member_expr(snippet.id_ref_expr(object, SPAN), property)
    };
    let copy = snippet.expr_stmt(snippet.assign_expr(
      snippet.member_assignment_target(read(export_obj)),
      Expression::from(read(target)),
    ));

    let left = builder.for_statement_left_variable_declaration(
      SPAN,
      VariableDeclarationKind::Var,
      builder.vec1(builder.variable_declarator(
        SPAN,
        VariableDeclarationKind::Var,
        snippet.binding_pattern(key),
        None,
        false,
      )),
      false,
    );
    let body =
      builder.statement_block(SPAN, builder.vec1(builder.statement_if(SPAN, test, copy, None)));
    builder.statement_for_in(SPAN, left, snippet.id_ref_expr(target, SPAN), body)
  }
}

fn unsupported(form: &str) -> sysreg_error::BuildError {
  TransformError::UnsupportedExportForm { form: form.to_string() }.into()
}
