use oxc::{
  ast::ast::{BindingIdentifier, IdentifierReference, Program},
  ast_visit::Visit,
};
use rustc_hash::FxHashSet;
use sysreg_utils::ecmascript::to_identifier;

/// Generates identifiers that are unique within one module.
///
/// Seeded with every name that appears in the module, so generated names never shadow or capture
/// anything the source refers to, including globals.
#[derive(Debug, Default)]
pub struct NamingContext {
  used_names: FxHashSet<String>,
}

impl NamingContext {
  pub fn from_program(program: &Program) -> Self {
    let mut collector = UsedNamesCollector::default();
    collector.visit_program(program);
    Self { used_names: collector.names }
  }

  /// `hint` becomes `_hint`, then `_hint2`, `_hint3` and so on. The returned name is reserved.
  pub fn generate_uid(&mut self, hint: &str) -> String {
    let identifier = to_identifier(hint);
    let base = identifier.trim_start_matches('_').trim_end_matches(|c: char| c.is_ascii_digit());

    let mut count: u32 = 1;
    loop {
      let mut candidate = String::with_capacity(base.len() + 3);
      candidate.push('_');
      candidate.push_str(base);
      if count > 1 {
        candidate.push_str(itoa::Buffer::new().format(count));
      }
      if !self.used_names.contains(&candidate) {
        self.used_names.insert(candidate.clone());
        return candidate;
      }
      count += 1;
    }
  }
}

#[derive(Default)]
struct UsedNamesCollector {
  names: FxHashSet<String>,
}

impl<'a> Visit<'a> for UsedNamesCollector {
  fn visit_binding_identifier(&mut self, it: &BindingIdentifier<'a>) {
    self.names.insert(it.name.to_string());
  }

  fn visit_identifier_reference(&mut self, it: &IdentifierReference<'a>) {
    self.names.insert(it.name.to_string());
  }
}

#[cfg(test)]
mod tests {
  use oxc::span::SourceType;
  use sysreg_ecmascript::EcmaCompiler;

  use super::*;

  #[test]
  fn avoids_names_in_the_module() {
    let ast = EcmaCompiler::parse(
      "a.js",
      "var _export = 1; console.log(_m, _export2);",
      SourceType::mjs(),
    )
    .unwrap();
    let mut naming = NamingContext::from_program(ast.program());
    assert!(naming.used_names.contains("console"));
    assert_eq!(naming.generate_uid("export"), "_export3");
    assert_eq!(naming.generate_uid("m"), "_m2");
    assert_eq!(naming.generate_uid("m"), "_m3");
  }

  #[test]
  fn hints_become_identifiers() {
    let mut naming = NamingContext::default();
    assert_eq!(naming.generate_uid("./foo-bar.js"), "_fooBarJs");
    assert_eq!(naming.generate_uid("exportObj"), "_exportObj");
    assert_eq!(naming.generate_uid("exportObj"), "_exportObj2");
    assert_eq!(naming.generate_uid("key2"), "_key");
  }
}
