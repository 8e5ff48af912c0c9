use arcstr::ArcStr;
use sysreg_utils::collections::{FxIndexMap, FxIndexSet};

/// Maps a top-level local binding to every name it is exported under.
///
/// Only [`ExportNameIndexBuilder`] can add entries. Once built, the index is read-only.
#[derive(Debug, Default)]
pub struct ExportNameIndex {
  aliases: FxIndexMap<ArcStr, FxIndexSet<ArcStr>>,
}

impl ExportNameIndex {
  pub fn aliases_of(&self, local: &str) -> Option<&FxIndexSet<ArcStr>> {
    self.aliases.get(local)
  }
}

#[derive(Debug, Default)]
pub struct ExportNameIndexBuilder {
  aliases: FxIndexMap<ArcStr, FxIndexSet<ArcStr>>,
}

impl ExportNameIndexBuilder {
  /// Records that `local` is exported as `exported`. Repeated aliases accumulate.
  pub fn add(&mut self, local: &str, exported: &str) {
    if let Some(aliases) = self.aliases.get_mut(local) {
      aliases.insert(exported.into());
    } else {
      self.aliases.insert(local.into(), FxIndexSet::from_iter([ArcStr::from(exported)]));
    }
  }

  pub fn build(self) -> ExportNameIndex {
    ExportNameIndex { aliases: self.aliases }
  }
}

#[test]
fn aliases_accumulate() {
  let mut builder = ExportNameIndexBuilder::default();
  builder.add("a", "a");
  builder.add("a", "b");
  builder.add("a", "b");
  builder.add("c", "default");
  let index = builder.build();

  let aliases = index.aliases_of("a").unwrap();
  assert_eq!(aliases.iter().map(ArcStr::as_str).collect::<Vec<_>>(), ["a", "b"]);
  assert!(index.aliases_of("c").is_some());
  assert!(index.aliases_of("d").is_none());
}
