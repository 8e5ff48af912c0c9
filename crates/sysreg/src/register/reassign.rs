use arcstr::ArcStr;
use oxc::{
  allocator::TakeIn,
  ast::ast::{self, AssignmentTarget, Expression, IdentifierReference, SimpleAssignmentTarget},
  ast_visit::{VisitMut, walk_mut},
  semantic::Scoping,
  span::{Atom, SPAN},
};
use sysreg_common::ExportNameIndex;
use sysreg_ecmascript::AstSnippet;
use sysreg_utils::collections::FxIndexSet;

use super::export_call::ExportCall;
use crate::utils::naming_context::NamingContext;

/// Keeps exports live: every later write to an exported top-level binding also goes through the
/// export channel, once per exported name.
///
/// ```js
/// a = 1;     _export("a", a = 1);
/// a += 1;    _export("a", a += 1);
/// a++;       _export("a", ++a);
/// f(a++);    f((_a = a++, _export("a", a), _a));
/// ```
///
/// Expressions are rewritten after their children, and the replacement is never visited again.
pub struct ReassignmentRewriter<'me, 'ast> {
  snippet: &'me AstSnippet<'ast>,
  export_call: ExportCall<'me, 'ast>,
  scoping: &'me Scoping,
  export_names: &'me ExportNameIndex,
  naming: &'me mut NamingContext,
  /// Temporaries that hold the old value of a postfix update. They need a `var` slot.
  pub temporaries: Vec<String>,
  pub rewritten: usize,
}

impl<'me, 'ast> ReassignmentRewriter<'me, 'ast> {
  pub fn new(
    snippet: &'me AstSnippet<'ast>,
    export_call: ExportCall<'me, 'ast>,
    scoping: &'me Scoping,
    export_names: &'me ExportNameIndex,
    naming: &'me mut NamingContext,
  ) -> Self {
    Self { snippet, export_call, scoping, export_names, naming, temporaries: vec![], rewritten: 0 }
  }

  fn aliases_of(&self, ident: &IdentifierReference) -> Option<&'me FxIndexSet<ArcStr>> {
    let export_names = self.export_names;
    let aliases = export_names.aliases_of(&ident.name)?;
    self.is_top_level_binding(ident).then_some(aliases)
  }

  /// References created while rewriting declarations have no id. They always point to the top
  /// level, because only top-level declarations are rewritten.
  fn is_top_level_binding(&self, ident: &IdentifierReference) -> bool {
    let Some(reference_id) = ident.reference_id.get() else {
      return true;
    };
    let symbol_id = self.scoping.get_reference(reference_id).symbol_id();
    symbol_id.is_some() && symbol_id == self.scoping.get_root_binding(&ident.name)
  }

  /// The aliases the written binding is exported under, plus the binding name when the old value
  /// of a postfix update must be preserved.
  fn tracked_write(
    &self,
    expr: &Expression<'ast>,
  ) -> Option<(&'me FxIndexSet<ArcStr>, Option<Atom<'ast>>)> {
    match expr {
      Expression::AssignmentExpression(assign) => match &assign.left {
        AssignmentTarget::AssignmentTargetIdentifier(ident) => {
          Some((self.aliases_of(ident)?, None))
        }
        _ => None,
      },
      Expression::UpdateExpression(update) => match &update.argument {
        SimpleAssignmentTarget::AssignmentTargetIdentifier(ident) => {
          let aliases = self.aliases_of(ident)?;
          Some((aliases, (!update.prefix).then_some(ident.name)))
        }
        _ => None,
      },
      _ => None,
    }
  }

  /// `a++` whose value is discarded is written as `++a`, so it needs no temporary.
  fn prefer_prefix_update(&self, expr: &mut Expression<'ast>) {
    let Expression::UpdateExpression(update) = expr else {
      return;
    };
    let tracked = match &update.argument {
      SimpleAssignmentTarget::AssignmentTargetIdentifier(ident) => {
        self.aliases_of(ident).is_some()
      }
      _ => false,
    };
    if tracked {
      update.prefix = true;
    }
  }
}

impl<'ast> VisitMut<'ast> for ReassignmentRewriter<'_, 'ast> {
  fn visit_expression(&mut self, expr: &mut Expression<'ast>) {
    walk_mut::walk_expression(self, expr);

    let Some((aliases, postfix_name)) = self.tracked_write(expr) else {
      return;
    };
    let write = expr.take_in(self.snippet.alloc());

    *expr = match postfix_name {
      None => self.export_call.wrap_aliases(aliases, write),
      Some(name) => {
        // (_a = a++, _export("a", a), _a)
        // Every site gets its own temporary in the factory scope. The `_export` call must not
        // run this same expression again before `_a` is read back.
        let temporary = self.naming.generate_uid(&name);
        let exported =
          self.export_call.wrap_aliases(aliases, self.snippet.id_ref_expr(&name, SPAN));
        let sequence = self.snippet.builder.vec_from_iter([
          self
            .snippet
            .assign_expr(self.snippet.simple_id_assignment_target(&temporary, SPAN), write),
          exported,
          self.snippet.id_ref_expr(&temporary, SPAN),
        ]);
        self.temporaries.push(temporary);
        self.snippet.seq_expr(sequence)
      }
    };
    self.rewritten += 1;
  }

  fn visit_expression_statement(&mut self, it: &mut ast::ExpressionStatement<'ast>) {
    self.prefer_prefix_update(&mut it.expression);
    walk_mut::walk_expression_statement(self, it);
  }

  fn visit_for_statement(&mut self, it: &mut ast::ForStatement<'ast>) {
    if let Some(update) = &mut it.update {
      self.prefer_prefix_update(update);
    }
    walk_mut::walk_for_statement(self, it);
  }
}
