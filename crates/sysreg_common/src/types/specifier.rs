use arcstr::ArcStr;

/// One binding that flows through a dependency.
///
/// For imports `local` is the binding in this module and `external` the name exported by the
/// dependency. For re-exports `local` is the name in the dependency and `external` the name this
/// module exports it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
  /// `import { external as local }` / `export { local as external } from`
  Named { local: ArcStr, external: ArcStr },
  /// `import local from`
  Default { local: ArcStr },
  /// `import * as local from` / `export * as local from`
  Namespace { local: ArcStr },
  /// `export * from`
  WildcardReexport,
}

impl Specifier {
  pub fn named(local: impl Into<ArcStr>, external: impl Into<ArcStr>) -> Self {
    Self::Named { local: local.into(), external: external.into() }
  }

  /// The binding this specifier introduces into the module scope, if it is an import.
  pub fn local(&self) -> Option<&ArcStr> {
    match self {
      Self::Named { local, .. } | Self::Default { local } | Self::Namespace { local } => {
        Some(local)
      }
      Self::WildcardReexport => None,
    }
  }

  /// The name read from the dependency's namespace object. `Default` reads `default`,
  /// `Namespace` and `WildcardReexport` read the whole object.
  pub fn imported_name(&self) -> Option<&str> {
    match self {
      Self::Named { external, .. } => Some(external),
      Self::Default { .. } => Some("default"),
      Self::Namespace { .. } | Self::WildcardReexport => None,
    }
  }
}

#[test]
fn default_reads_the_default_export() {
  let specifier = Specifier::Default { local: "foo".into() };
  assert_eq!(specifier.imported_name(), Some("default"));
  assert_eq!(specifier.local().map(ArcStr::as_str), Some("foo"));
  assert_eq!(Specifier::WildcardReexport.local(), None);
}
