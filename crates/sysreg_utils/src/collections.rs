use std::hash::BuildHasherDefault;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;

pub use rustc_hash::{FxHashMap, FxHashSet};

/// Insertion ordered map. Iteration order is first-insertion order, which is what keeps
/// generated output deterministic.
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;
