use oxc::{
  allocator::{Box as ArenaBox, TakeIn, Vec as ArenaVec},
  ast::ast::{
    self, Declaration, ExportDefaultDeclarationKind, Expression, ImportDeclarationSpecifier,
    ModuleExportName, Statement,
  },
  span::{Atom, SPAN},
};
use sysreg_common::{DependencyTable, ExportNameIndex, ExportNameIndexBuilder, Specifier};
use sysreg_ecmascript::{AstSnippet, BindingPatternExt};
use sysreg_error::{BuildResult, TransformError};
use sysreg_utils::collections::FxIndexSet;

use super::export_call::ExportCall;

pub struct ClassifiedModule<'ast> {
  pub dependencies: DependencyTable,
  /// Statements that run in the factory, before `setters` and `execute` are handed out.
  pub before_body: ArenaVec<'ast, Statement<'ast>>,
  /// What is left for `execute`, in source order.
  pub body: ArenaVec<'ast, Statement<'ast>>,
  pub export_names: ExportNameIndex,
  /// Locals introduced by the removed import declarations. They still need a `var` slot.
  pub import_bindings: Vec<String>,
  /// Every name this module exports explicitly.
  pub exported_names: FxIndexSet<String>,
}

/// Walks the top-level statements once, in source order, and sorts each into the dependency
/// table, the pre-body block or the execute body.
pub struct ModuleClassifier<'me, 'ast> {
  snippet: &'me AstSnippet<'ast>,
  export_call: ExportCall<'me, 'ast>,
  can_hoist: bool,
  dependencies: DependencyTable,
  before_body: ArenaVec<'ast, Statement<'ast>>,
  body: ArenaVec<'ast, Statement<'ast>>,
  export_names: ExportNameIndexBuilder,
  import_bindings: Vec<String>,
  exported_names: FxIndexSet<String>,
}

impl<'me, 'ast> ModuleClassifier<'me, 'ast> {
  pub fn new(
    snippet: &'me AstSnippet<'ast>,
    export_call: ExportCall<'me, 'ast>,
    can_hoist: bool,
  ) -> Self {
    Self {
      snippet,
      export_call,
      can_hoist,
      dependencies: DependencyTable::default(),
      before_body: snippet.builder.vec(),
      body: snippet.builder.vec(),
      export_names: ExportNameIndexBuilder::default(),
      import_bindings: vec![],
      exported_names: FxIndexSet::default(),
    }
  }

  pub fn classify(
    mut self,
    statements: ArenaVec<'ast, Statement<'ast>>,
  ) -> BuildResult<ClassifiedModule<'ast>> {
    for stmt in statements {
      self.classify_statement(stmt)?;
    }

    Ok(ClassifiedModule {
      dependencies: self.dependencies,
      before_body: self.before_body,
      body: self.body,
      export_names: self.export_names.build(),
      import_bindings: self.import_bindings,
      exported_names: self.exported_names,
    })
  }

  fn classify_statement(&mut self, stmt: Statement<'ast>) -> BuildResult<()> {
    match stmt {
      Statement::FunctionDeclaration(_) if self.can_hoist => self.before_body.push(stmt),
      Statement::ImportDeclaration(import_decl) => self.classify_import(&import_decl)?,
      Statement::ExportAllDeclaration(export_all) => {
        let entry = self.dependencies.entry(&export_all.source.value);
        match &export_all.exported {
          // export * from 'x'
          None => entry.exports.push(Specifier::WildcardReexport),
          // export * as ns from 'x'
          Some(exported) => {
            let name = exported.name();
            entry.exports.push(Specifier::Namespace { local: name.as_str().into() });
            self.exported_names.insert(name.to_string());
          }
        }
      }
      Statement::ExportDefaultDeclaration(mut default_decl) => {
        self.classify_export_default(&mut default_decl)?;
      }
      Statement::ExportNamedDeclaration(mut named_decl) => {
        self.classify_export_named(&mut named_decl)?;
      }
      Statement::TSExportAssignment(_) => return Err(unsupported("export =")),
      Statement::TSNamespaceExportDeclaration(_) => return Err(unsupported("export as namespace")),
      _ => self.body.push(stmt),
    }
    Ok(())
  }

  fn classify_import(&mut self, import_decl: &ast::ImportDeclaration<'ast>) -> BuildResult<()> {
    if import_decl.import_kind.is_type() {
      return Err(unsupported("import type"));
    }
    // `import 'x'` still registers the dependency.
    let entry = self.dependencies.entry(&import_decl.source.value);
    for specifier in import_decl.specifiers.iter().flatten() {
      let (specifier, local) = match specifier {
        ImportDeclarationSpecifier::ImportSpecifier(spec) if spec.import_kind.is_type() => {
          return Err(unsupported("import { type }"));
        }
        ImportDeclarationSpecifier::ImportSpecifier(spec) => (
          Specifier::named(spec.local.name.as_str(), spec.imported.name().as_str()),
          spec.local.name,
        ),
        ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
          (Specifier::Default { local: spec.local.name.as_str().into() }, spec.local.name)
        }
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
          (Specifier::Namespace { local: spec.local.name.as_str().into() }, spec.local.name)
        }
      };
      entry.imports.push(specifier);
      self.import_bindings.push(local.to_string());
    }
    Ok(())
  }

  fn classify_export_default(
    &mut self,
    default_decl: &mut ast::ExportDefaultDeclaration<'ast>,
  ) -> BuildResult<()> {
    let alloc = self.snippet.alloc();
    self.exported_names.insert("default".to_string());

    match &mut default_decl.declaration {
      decl @ ast::match_expression!(ExportDefaultDeclarationKind) => {
        // export default foo + 1
        let expr = decl.to_expression_mut().take_in(alloc);
        self.body.push(self.export_call.stmt("default", expr));
      }
      ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
        let mut func = func.as_mut().take_in(alloc);
        if let Some(name) = func.id.as_ref().map(|id| id.name) {
          // export default function foo() {}
          let export_stmt = self.export_call.stmt("default", self.snippet.id_ref_expr(&name, SPAN));
          self.export_names.add(&name, "default");
          let target = if self.can_hoist { &mut self.before_body } else { &mut self.body };
          target.push(Statement::FunctionDeclaration(ArenaBox::new_in(func, alloc)));
          target.push(export_stmt);
        } else {
          // export default function () {}
          func.r#type = ast::FunctionType::FunctionExpression;
          let expr = Expression::FunctionExpression(ArenaBox::new_in(func, alloc));
          let target = if self.can_hoist { &mut self.before_body } else { &mut self.body };
          target.push(self.export_call.stmt("default", expr));
        }
      }
      ExportDefaultDeclarationKind::ClassDeclaration(class) => {
        let mut class = class.as_mut().take_in(alloc);
        if let Some(name) = class.id.as_ref().map(|id| id.name) {
          // export default class Foo {}
          self.export_names.add(&name, "default");
          self.body.push(Statement::ClassDeclaration(ArenaBox::new_in(class, alloc)));
          self.body.push(self.export_call.stmt("default", self.snippet.id_ref_expr(&name, SPAN)));
        } else {
          // export default class {}
          class.r#type = ast::ClassType::ClassExpression;
          let expr = Expression::ClassExpression(ArenaBox::new_in(class, alloc));
          self.body.push(self.export_call.stmt("default", expr));
        }
      }
      ExportDefaultDeclarationKind::TSInterfaceDeclaration(_) => {
        return Err(unsupported("export default interface"));
      }
    }
    Ok(())
  }

  fn classify_export_named(
    &mut self,
    named_decl: &mut ast::ExportNamedDeclaration<'ast>,
  ) -> BuildResult<()> {
    if named_decl.export_kind.is_type() {
      return Err(unsupported("export type"));
    }

    if let Some(decl) = named_decl.declaration.take() {
      // export var a = 1, b = 2
      // export function foo() {}
      // export class Foo {}
      let names = declared_names(&decl)?;
      let is_function = matches!(decl, Declaration::FunctionDeclaration(_));
      let target =
        if self.can_hoist && is_function { &mut self.before_body } else { &mut self.body };
      target.push(Statement::from(decl));
      for name in names {
        target.push(self.export_call.stmt(&name, self.snippet.id_ref_expr(&name, SPAN)));
        self.export_names.add(&name, &name);
        self.exported_names.insert(name.to_string());
      }
      return Ok(());
    }

    if let Some(source) = &named_decl.source {
      // export { a, b as c } from 'x'
      let entry = self.dependencies.entry(&source.value);
      for specifier in &named_decl.specifiers {
        if specifier.export_kind.is_type() {
          return Err(unsupported("export { type }"));
        }
        let exported = specifier.exported.name();
        entry.exports.push(Specifier::named(specifier.local.name().as_str(), exported.as_str()));
        self.exported_names.insert(exported.to_string());
      }
      return Ok(());
    }

    // export { a, b as c }
    for specifier in &named_decl.specifiers {
      if specifier.export_kind.is_type() {
        return Err(unsupported("export { type }"));
      }
      // The parser rejects string locals without `from`.
      let ModuleExportName::IdentifierReference(local) = &specifier.local else {
        return Err(unsupported("export { 'string' } without a source"));
      };
      let exported = specifier.exported.name();
      self.body.push(self.export_call.stmt(&exported, self.snippet.id_ref_expr(&local.name, SPAN)));
      self.export_names.add(&local.name, &exported);
      self.exported_names.insert(exported.to_string());
    }
    Ok(())
  }
}

fn declared_names<'ast>(decl: &Declaration<'ast>) -> BuildResult<Vec<Atom<'ast>>> {
  let names = match decl {
    Declaration::VariableDeclaration(var_decl) => var_decl
      .declarations
      .iter()
      .flat_map(|declarator| declarator.id.binding_identifiers())
      .map(|ident| ident.name)
      .collect(),
    Declaration::FunctionDeclaration(func) => func.id.iter().map(|id| id.name).collect(),
    Declaration::ClassDeclaration(class) => class.id.iter().map(|id| id.name).collect(),
    _ => return Err(unsupported("export of a TypeScript declaration")),
  };
  Ok(names)
}

fn unsupported(form: &str) -> sysreg_error::BuildError {
  TransformError::UnsupportedExportForm { form: form.to_string() }.into()
}

#[cfg(test)]
mod tests {
  use arcstr::ArcStr;
  use oxc::allocator::TakeIn;
  use sysreg_common::Specifier;
  use sysreg_ecmascript::AstSnippet;

  use super::*;
  use crate::utils::parse_to_ecma_ast::parse_to_ecma_ast;

  struct Summary {
    sources: Vec<String>,
    imports: Vec<Vec<Specifier>>,
    exports: Vec<Vec<Specifier>>,
    before_body: usize,
    body: usize,
    export_names: ExportNameIndex,
    import_bindings: Vec<String>,
  }

  fn classify(source: &str, can_hoist: bool) -> BuildResult<Summary> {
    let (mut ast, _) = parse_to_ecma_ast("test.js", source.to_string())?;
    ast.with_mut(|fields| {
      let snippet = AstSnippet::new(fields.allocator);
      let export_call = ExportCall::new(&snippet, "_export");
      let body = fields.program.body.take_in(fields.allocator);
      let module = ModuleClassifier::new(&snippet, export_call, can_hoist).classify(body)?;
      Ok(Summary {
        sources: module.dependencies.sources().map(ToString::to_string).collect(),
        imports: module.dependencies.iter().map(|entry| entry.imports.clone()).collect(),
        exports: module.dependencies.iter().map(|entry| entry.exports.clone()).collect(),
        before_body: module.before_body.len(),
        body: module.body.len(),
        export_names: module.export_names,
        import_bindings: module.import_bindings,
      })
    })
  }

  #[test]
  fn imports_and_reexports_share_an_entry() {
    let source = "import a, { b as c } from 'x'; import * as ns from 'y';
      export { d } from 'x'; export * from 'y';";
    let summary = classify(source, true).unwrap();
    assert_eq!(summary.sources, ["x", "y"]);
    assert_eq!(
      summary.imports[0],
      [Specifier::Default { local: "a".into() }, Specifier::named("c", "b")]
    );
    assert_eq!(summary.imports[1], [Specifier::Namespace { local: "ns".into() }]);
    assert_eq!(summary.exports[0], [Specifier::named("d", "d")]);
    assert_eq!(summary.exports[1], [Specifier::WildcardReexport]);
    assert_eq!(summary.import_bindings, ["a", "c", "ns"]);
    assert_eq!(summary.body, 0);
  }

  #[test]
  fn export_name_index_accumulates_aliases() {
    let summary = classify("var a = 1; export { a, a as b }; export var c = 2;", true).unwrap();
    let aliases = |local| {
      summary.export_names.aliases_of(local).unwrap().iter().map(ArcStr::as_str).collect::<Vec<_>>()
    };
    assert_eq!(aliases("a"), ["a", "b"]);
    assert_eq!(aliases("c"), ["c"]);
    // var a, two export calls, var c, one export call
    assert_eq!(summary.body, 5);
  }

  #[test]
  fn functions_move_only_when_hoisting_is_allowed() {
    let source = "function f() {} export function g() {} export default function h() {}";
    let hoisted = classify(source, true).unwrap();
    assert_eq!((hoisted.before_body, hoisted.body), (5, 0));

    let in_place = classify(source, false).unwrap();
    assert_eq!((in_place.before_body, in_place.body), (0, 5));
  }

  #[test]
  fn anonymous_default_has_no_index_entry() {
    let summary = classify("export default function () {}", true).unwrap();
    assert!(summary.export_names.aliases_of("default").is_none());
    assert_eq!((summary.before_body, summary.body), (1, 0));

    let in_place = classify("let x; export default function () {}", false).unwrap();
    assert_eq!((in_place.before_body, in_place.body), (0, 2));
  }

  #[test]
  fn string_names_in_reexports() {
    let summary = classify("export { 'a-b' as c, d as 'e-f' } from 'x'; export {} from 'y';", true)
      .unwrap();
    assert_eq!(summary.sources, ["x", "y"]);
    assert_eq!(summary.exports[0], [Specifier::named("a-b", "c"), Specifier::named("d", "e-f")]);
    assert!(summary.exports[1].is_empty());
  }
}
