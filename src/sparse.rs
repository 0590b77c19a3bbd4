use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::DisjointSets;
use crate::dense::{DenseUnionFind, UnionStrategy};
use crate::error::UnionFindError;

/// Union-find over arbitrary hashable keys, registered incrementally.
///
/// A key interner in front of [`DenseUnionFind`]: every registered key gets
/// a dense slot and all set operations run on the dense core. A key must be
/// registered with [`add`](Self::add) before it appears in a query; an
/// unknown key is reported as an error, never silently registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Eq + Hash",
    deserialize = "K: Deserialize<'de> + Eq + Hash"
))]
pub struct SparseUnionFind<K> {
    indices: HashMap<K, usize>,
    keys: Vec<K>,
    core: DenseUnionFind,
}

impl<K> SparseUnionFind<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Empty universe, merging by rank. Elements are registered with add().
    pub fn new() -> Self {
        Self::with_strategy(UnionStrategy::ByRank)
    }

    pub fn with_strategy(strategy: UnionStrategy) -> Self {
        Self {
            indices: HashMap::new(),
            keys: Vec::new(),
            core: DenseUnionFind::with_strategy(0, strategy),
        }
    }

    /// Register `key` as a new singleton set.
    /// Returns true on first registration, false if the key was already known.
    pub fn add(&mut self, key: K) -> bool {
        if self.indices.contains_key(&key) {
            return false;
        }
        let slot = self.core.push_singleton();
        self.indices.insert(key.clone(), slot);
        self.keys.push(key);
        true
    }

    /// Canonical representative of the set containing `key`.
    pub fn find(&mut self, key: &K) -> Result<K, UnionFindError> {
        let slot = self.slot(key)?;
        let root = self.core.find(slot);
        Ok(self.keys[root].clone())
    }

    /// Merge the sets containing `x` and `y`.
    /// Returns true if they were in different sets (actually merged).
    pub fn union(&mut self, x: &K, y: &K) -> Result<bool, UnionFindError> {
        let sx = self.slot(x)?;
        let sy = self.slot(y)?;
        Ok(self.core.union(sx, sy))
    }

    /// Check if two keys are in the same set.
    pub fn connected(&mut self, x: &K, y: &K) -> Result<bool, UnionFindError> {
        let sx = self.slot(x)?;
        let sy = self.slot(y)?;
        Ok(self.core.connected(sx, sy))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.indices.contains_key(key)
    }

    /// Number of disjoint sets.
    pub fn groups(&self) -> usize {
        self.core.groups()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over the representative key of every set.
    pub fn roots(&self) -> impl Iterator<Item = &K> {
        self.core.roots().map(|slot| &self.keys[slot])
    }

    fn slot(&self, key: &K) -> Result<usize, UnionFindError> {
        self.indices
            .get(key)
            .copied()
            .ok_or_else(|| UnionFindError::UnknownElement {
                key: format!("{key:?}"),
            })
    }
}

impl<K> Default for SparseUnionFind<K>
where
    K: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DisjointSets for SparseUnionFind<K>
where
    K: Eq + Hash + Clone + Debug,
{
    type Element = K;

    fn find(&mut self, key: &K) -> Result<K, UnionFindError> {
        self.find(key)
    }

    fn union(&mut self, x: &K, y: &K) -> Result<bool, UnionFindError> {
        self.union(x, y)
    }

    fn connected(&mut self, x: &K, y: &K) -> Result<bool, UnionFindError> {
        self.connected(x, y)
    }

    fn groups(&self) -> usize {
        self.groups()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_union() {
        let mut uf = SparseUnionFind::new();
        assert!(uf.is_empty());
        assert_eq!(uf.groups(), 0);
        assert!(uf.add("a"));
        assert!(uf.add("b"));
        assert_eq!(uf.groups(), 2);
        assert!(uf.union(&"a", &"b").expect("both keys registered"));
        assert_eq!(uf.groups(), 1);
        assert_eq!(uf.find(&"b").expect("registered"), "a");
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut uf = SparseUnionFind::new();
        assert!(uf.add(7));
        assert!(!uf.add(7));
        assert_eq!(uf.len(), 1);
        assert_eq!(uf.groups(), 1);
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let mut uf = SparseUnionFind::new();
        uf.add("a");
        assert!(matches!(
            uf.find(&"c"),
            Err(UnionFindError::UnknownElement { .. })
        ));
        assert!(matches!(
            uf.union(&"a", &"c"),
            Err(UnionFindError::UnknownElement { .. })
        ));
        // failed lookups register nothing
        assert!(!uf.contains(&"c"));
        assert_eq!(uf.len(), 1);
        assert_eq!(uf.groups(), 1);
    }

    #[test]
    fn test_unknown_key_message_names_the_key() {
        let mut uf = SparseUnionFind::new();
        uf.add("a");
        let err = uf.find(&"ghost").expect_err("never registered");
        assert_eq!(
            err.to_string(),
            "unknown element \"ghost\", never registered with add()"
        );
    }

    #[test]
    fn test_streamed_edges() {
        // register endpoints as they appear in an edge stream
        let edges = [("n1", "n2"), ("n3", "n4"), ("n2", "n3")];
        let mut uf = SparseUnionFind::new();
        for (a, b) in edges {
            uf.add(a);
            uf.add(b);
            uf.union(&a, &b).expect("endpoints just registered");
        }
        assert_eq!(uf.len(), 4);
        assert_eq!(uf.groups(), 1);
        assert!(uf.connected(&"n1", &"n4").expect("registered"));
    }

    #[test]
    fn test_roots_one_per_group() {
        let mut uf = SparseUnionFind::new();
        for key in ["a", "b", "c", "d"] {
            uf.add(key);
        }
        uf.union(&"a", &"b").expect("registered");
        uf.union(&"c", &"d").expect("registered");
        let roots: Vec<&&str> = uf.roots().collect();
        assert_eq!(roots, vec![&"a", &"c"]);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut uf = SparseUnionFind::new();
        for key in ["a", "b", "c"] {
            uf.add(key.to_string());
        }
        uf.union(&"a".to_string(), &"b".to_string()).expect("registered");

        let json = serde_json::to_string(&uf).expect("serializes");
        let mut restored: SparseUnionFind<String> =
            serde_json::from_str(&json).expect("deserializes");

        assert_eq!(restored.groups(), 2);
        assert!(
            restored
                .connected(&"a".to_string(), &"b".to_string())
                .expect("registered")
        );
        assert!(
            !restored
                .connected(&"a".to_string(), &"c".to_string())
                .expect("registered")
        );
    }
}
