use arcstr::ArcStr;
use sysreg_utils::collections::FxIndexMap;

use super::specifier::Specifier;

#[derive(Debug)]
pub struct DependencyEntry {
  pub source: ArcStr,
  /// Bindings assigned on every setter invocation.
  pub imports: Vec<Specifier>,
  /// Bindings projected into the bulk export object.
  pub exports: Vec<Specifier>,
}

impl DependencyEntry {
  pub fn new(source: ArcStr) -> Self {
    Self { source, imports: vec![], exports: vec![] }
  }

  #[inline]
  pub fn has_reexports(&self) -> bool {
    !self.exports.is_empty()
  }
}

/// Dependency entries keyed by source, in the order each source is first seen.
#[derive(Debug, Default)]
pub struct DependencyTable {
  entries: FxIndexMap<ArcStr, DependencyEntry>,
}

impl DependencyTable {
  /// Returns the entry for `source`, creating it at the end of the table if this is the first
  /// time the source is seen.
  pub fn entry(&mut self, source: &str) -> &mut DependencyEntry {
    if let Some(index) = self.entries.get_index_of(source) {
      return &mut self.entries[index];
    }
    let source = ArcStr::from(source);
    self.entries.entry(source.clone()).or_insert_with(|| DependencyEntry::new(source))
  }

  pub fn sources(&self) -> impl Iterator<Item = &ArcStr> {
    self.entries.keys()
  }

  pub fn iter(&self) -> impl ExactSizeIterator<Item = &DependencyEntry> {
    self.entries.values()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_occurrence_fixes_the_position() {
    let mut table = DependencyTable::default();
    table.entry("a").imports.push(Specifier::named("x", "x"));
    table.entry("b").exports.push(Specifier::WildcardReexport);
    table.entry("a").exports.push(Specifier::named("y", "y"));

    assert_eq!(table.sources().map(ArcStr::as_str).collect::<Vec<_>>(), ["a", "b"]);
    let a = table.iter().next().unwrap();
    assert_eq!(a.imports.len(), 1);
    assert!(a.has_reexports());
    assert_eq!(table.iter().len(), 2);
  }
}
