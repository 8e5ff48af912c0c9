use oxc::{
  allocator::{Box as ArenaBox, TakeIn, Vec as ArenaVec},
  ast::ast::{
    self, AssignmentTarget, Expression, ForStatementInit, ForStatementLeft, Statement,
    VariableDeclarationKind,
  },
  ast_visit::{VisitMut, walk_mut},
  syntax::scope::ScopeFlags,
};
use sysreg_ecmascript::{AstSnippet, BindingPatternExt, StatementExt};
use sysreg_utils::collections::FxIndexSet;

/// Whether declarations may be lifted out of `execute`, decided once per module.
#[derive(Debug, Clone, Copy)]
pub struct HoistDecision {
  can_hoist: bool,
}

impl HoistDecision {
  /// Hoisting is only safe when no top-level declaration is block scoped.
  pub fn compute(body: &[Statement]) -> Self {
    Self { can_hoist: !body.iter().any(|stmt| stmt.is_lexical_variable_declaration()) }
  }

  #[inline]
  pub fn can_hoist(self) -> bool {
    self.can_hoist
  }
}

/// Rewrites every `var` of the module's top-level function scope into plain assignments and
/// collects the declared names, so one `var` statement in the factory can declare them all.
///
/// ```js
/// var a = 1, b;          a = 1;
/// for (var k in o) {}    for (k in o) {}
/// class Foo {}           Foo = class Foo {};
/// ```
pub struct VarHoister<'me, 'ast> {
  snippet: &'me AstSnippet<'ast>,
  hoisted_names: FxIndexSet<String>,
}

impl<'me, 'ast> VarHoister<'me, 'ast> {
  pub fn new(snippet: &'me AstSnippet<'ast>) -> Self {
    Self { snippet, hoisted_names: FxIndexSet::default() }
  }

  pub fn hoist(mut self, body: &mut ArenaVec<'ast, Statement<'ast>>) -> FxIndexSet<String> {
    for stmt in body.iter_mut() {
      self.hoist_top_level_class(stmt);
    }
    self.visit_statements(body);
    self.hoisted_names
  }

  fn hoist_top_level_class(&mut self, stmt: &mut Statement<'ast>) {
    let Statement::ClassDeclaration(class) = stmt else {
      return;
    };
    let Some(name) = class.id.as_ref().map(|id| id.name) else {
      return;
    };
    let alloc = self.snippet.alloc();
    let mut class = class.as_mut().take_in(alloc);
    class.r#type = ast::ClassType::ClassExpression;
    let class_expr = Expression::ClassExpression(ArenaBox::new_in(class, alloc));
    *stmt = self.snippet.id_assign_stmt(&name, class_expr);
    self.hoisted_names.insert(name.to_string());
  }

  /// `var a = 1, { b } = c` becomes `a = 1, { b } = c`. Returns `None` when nothing is
  /// initialized.
  fn hoist_var_declaration(
    &mut self,
    decl: &mut ast::VariableDeclaration<'ast>,
  ) -> Option<Expression<'ast>> {
    let mut assignments = self.snippet.builder.vec();
    for declarator in &mut decl.declarations {
      for ident in declarator.id.binding_identifiers() {
        self.hoisted_names.insert(ident.name.to_string());
      }
      if let Some(mut init) = declarator.init.take() {
        self.visit_expression(&mut init);
        let target = self.snippet.binding_pattern_to_assignment_target(&mut declarator.id);
        assignments.push(self.snippet.assign_expr(target, init));
      }
    }
    match assignments.len() {
      0 => None,
      1 => assignments.pop(),
      _ => Some(self.snippet.seq_expr(assignments)),
    }
  }

  /// `for (var k in o)` becomes `for (k in o)`.
  fn hoist_for_left(&mut self, left: &mut ForStatementLeft<'ast>) {
    let ForStatementLeft::VariableDeclaration(decl) = left else {
      return;
    };
    if !is_var(decl) {
      return;
    }
    let Some(declarator) = decl.declarations.first_mut() else {
      return;
    };
    for ident in declarator.id.binding_identifiers() {
      self.hoisted_names.insert(ident.name.to_string());
    }
    let target = self.snippet.binding_pattern_to_assignment_target(&mut declarator.id);
    *left = match target {
      AssignmentTarget::AssignmentTargetIdentifier(ident) => {
        ForStatementLeft::AssignmentTargetIdentifier(ident)
      }
      AssignmentTarget::ArrayAssignmentTarget(array) => {
        ForStatementLeft::ArrayAssignmentTarget(array)
      }
      AssignmentTarget::ObjectAssignmentTarget(object) => {
        ForStatementLeft::ObjectAssignmentTarget(object)
      }
      _ => unreachable!("binding patterns only convert to identifiers or destructuring targets"),
    };
  }
}

fn is_var(decl: &ast::VariableDeclaration) -> bool {
  matches!(decl.kind, VariableDeclarationKind::Var)
}

impl<'ast> VisitMut<'ast> for VarHoister<'_, 'ast> {
  fn visit_statements(&mut self, stmts: &mut ArenaVec<'ast, Statement<'ast>>) {
    let old_stmts = stmts.take_in(self.snippet.alloc());
    for mut stmt in old_stmts {
      if let Statement::VariableDeclaration(decl) = &mut stmt {
        if is_var(decl) {
          if let Some(expr) = self.hoist_var_declaration(decl) {
            stmts.push(self.snippet.expr_stmt(expr));
          }
          continue;
        }
      }
      self.visit_statement(&mut stmt);
      stmts.push(stmt);
    }
  }

  fn visit_statement(&mut self, stmt: &mut Statement<'ast>) {
    // `if (a) var b = 1;` has no statement list to drop the declaration from.
    if let Statement::VariableDeclaration(decl) = stmt {
      if is_var(decl) {
        *stmt = match self.hoist_var_declaration(decl) {
          Some(expr) => self.snippet.expr_stmt(expr),
          None => self.snippet.builder.statement_empty(decl.span),
        };
        return;
      }
    }
    walk_mut::walk_statement(self, stmt);
  }

  fn visit_for_statement(&mut self, it: &mut ast::ForStatement<'ast>) {
    if let Some(ForStatementInit::VariableDeclaration(decl)) = &mut it.init {
      if is_var(decl) {
        it.init = self.hoist_var_declaration(decl).map(ForStatementInit::from);
      }
    }
    walk_mut::walk_for_statement(self, it);
  }

  fn visit_for_in_statement(&mut self, it: &mut ast::ForInStatement<'ast>) {
    self.hoist_for_left(&mut it.left);
    walk_mut::walk_for_in_statement(self, it);
  }

  fn visit_for_of_statement(&mut self, it: &mut ast::ForOfStatement<'ast>) {
    self.hoist_for_left(&mut it.left);
    walk_mut::walk_for_of_statement(self, it);
  }

  // `var` inside these belongs to another function scope.
  fn visit_function(&mut self, _it: &mut ast::Function<'ast>, _flags: ScopeFlags) {}

  fn visit_arrow_function_expression(&mut self, _it: &mut ast::ArrowFunctionExpression<'ast>) {}

  fn visit_static_block(&mut self, _it: &mut ast::StaticBlock<'ast>) {}
}

#[cfg(test)]
mod tests {
  use sysreg_ecmascript::EcmaCompiler;

  use super::*;
  use crate::utils::parse_to_ecma_ast::parse_to_ecma_ast;

  fn hoist(source: &str) -> (String, Vec<String>) {
    let (mut ast, _) = parse_to_ecma_ast("test.js", source.to_string()).unwrap();
    let names = ast.with_mut(|fields| {
      let snippet = AstSnippet::new(fields.allocator);
      VarHoister::new(&snippet).hoist(&mut fields.program.body)
    });
    (EcmaCompiler::print(&ast), names.into_iter().collect())
  }

  fn normalize(source: &str) -> String {
    EcmaCompiler::normalize_script(source).unwrap()
  }

  #[test]
  fn decision_sees_through_export() {
    for (source, expected) in [
      ("var a; function f() { let b; }", true),
      ("export const a = 1;", false),
      ("let a;", false),
      ("{ let a; }", true),
    ] {
      let (ast, _) = parse_to_ecma_ast("test.js", source.to_string()).unwrap();
      let decision = HoistDecision::compute(&ast.program().body);
      assert_eq!(decision.can_hoist(), expected, "{source}");
    }
  }

  #[test]
  fn declarations_become_assignments() {
    let (code, names) = hoist("var a = 1, b; var { c, d: [e] } = obj; if (x) { var f = 2; }");
    assert_eq!(code, normalize("a = 1; ({ c, d: [e] } = obj); if (x) { f = 2; }"));
    assert_eq!(names, ["a", "b", "c", "e", "f"]);
  }

  #[test]
  fn loop_heads() {
    let (code, names) =
      hoist("for (var i = 0, j = 1; i < j; i++) {} for (var k in o) {} for (var [v] of list) {}");
    let expected =
      normalize("for (i = 0, j = 1; i < j; i++) {} for (k in o) {} for ([v] of list) {}");
    assert_eq!(code, expected);
    assert_eq!(names, ["i", "j", "k", "v"]);
  }

  #[test]
  fn nested_functions_keep_their_vars() {
    let (code, names) = hoist(
      "function f() { var a = 1; }
      var g = () => { var b; };
      class C { static { var c; } }",
    );
    let expected = normalize(
      "function f() { var a = 1; }
      g = () => { var b; };
      C = class C { static { var c; } };",
    );
    assert_eq!(code, expected);
    assert_eq!(names, ["C", "g"]);
  }

  #[test]
  fn block_scoped_declarations_are_left_alone() {
    let (code, names) = hoist("{ let a = 1; const b = 2; }");
    assert_eq!(code, normalize("{ let a = 1; const b = 2; }"));
    assert!(names.is_empty());
  }
}
