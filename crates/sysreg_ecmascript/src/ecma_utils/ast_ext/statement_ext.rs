use oxc::ast::ast::{self, Declaration, VariableDeclarationKind};

pub trait StatementExt<'ast> {
  /// `let`, `const` and `using` declarations, written directly or behind `export`.
  fn is_lexical_variable_declaration(&self) -> bool;
}

impl<'ast> StatementExt<'ast> for ast::Statement<'ast> {
  fn is_lexical_variable_declaration(&self) -> bool {
    let var_decl = match self {
      ast::Statement::VariableDeclaration(var_decl) => var_decl,
      ast::Statement::ExportNamedDeclaration(named_decl) => {
        let Some(Declaration::VariableDeclaration(var_decl)) = &named_decl.declaration else {
          return false;
        };
        var_decl
      }
      _ => return false,
    };
    !matches!(var_decl.kind, VariableDeclarationKind::Var)
  }
}
