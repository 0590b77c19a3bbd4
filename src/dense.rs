use serde::{Deserialize, Serialize};

use crate::DisjointSets;
use crate::error::UnionFindError;

/// Merge direction policy, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnionStrategy {
    /// Attach the lower-rank root under the higher-rank root. On a rank tie
    /// the first root wins and its rank grows by one.
    ByRank,
    /// Always attach the second root under the first. Ranks are never
    /// touched; path compression alone keeps lookups cheap.
    FirstRootWins,
}

/// Quick-union over the dense universe `0..len`, with path compression.
///
/// Each element starts in its own set. union() unites two sets, find()
/// returns the canonical representative. The number of disjoint sets is
/// tracked in a counter, so groups() is O(1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseUnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    groups: usize,
    strategy: UnionStrategy,
}

impl DenseUnionFind {
    /// Universe `0..len`, one singleton set per element, merging by rank.
    pub fn new(len: usize) -> Self {
        Self::with_strategy(len, UnionStrategy::ByRank)
    }

    pub fn with_strategy(len: usize, strategy: UnionStrategy) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            groups: len,
            strategy,
        }
    }

    /// Grow the universe by one element in its own singleton set and return
    /// its index.
    pub fn push_singleton(&mut self) -> usize {
        let x = self.parent.len();
        self.parent.push(x);
        self.rank.push(0);
        self.groups += 1;
        x
    }

    /// Find the canonical representative of element `x`.
    ///
    /// Every element visited on the way up is re-pointed directly at the
    /// root, so repeated lookups stay flat. Panics if `x >= len`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // second pass: path compression
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Find the representative of `x` without path compression. Useful when
    /// only an immutable reference is available.
    pub fn find_no_compress(&self, mut x: usize) -> usize {
        while self.parent[x] != x {
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets containing `x` and `y`.
    /// Returns true if they were in different sets (actually merged).
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }
        match self.strategy {
            UnionStrategy::ByRank => match self.rank[rx].cmp(&self.rank[ry]) {
                std::cmp::Ordering::Less => self.parent[rx] = ry,
                std::cmp::Ordering::Greater => self.parent[ry] = rx,
                std::cmp::Ordering::Equal => {
                    self.parent[ry] = rx;
                    self.rank[rx] += 1;
                }
            },
            UnionStrategy::FirstRootWins => self.parent[ry] = rx,
        }
        self.groups -= 1;
        true
    }

    /// Check if two elements are in the same set.
    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of disjoint sets.
    pub fn groups(&self) -> usize {
        self.groups
    }

    /// Number of elements in the universe.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Iterate over the current set representatives, in index order.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i == p)
            .map(|(i, _)| i)
    }

    fn check(&self, x: usize) -> Result<(), UnionFindError> {
        if x < self.parent.len() {
            Ok(())
        } else {
            Err(UnionFindError::OutOfRange {
                index: x,
                len: self.parent.len(),
            })
        }
    }
}

impl DisjointSets for DenseUnionFind {
    type Element = usize;

    fn find(&mut self, x: &usize) -> Result<usize, UnionFindError> {
        self.check(*x)?;
        Ok(self.find(*x))
    }

    fn union(&mut self, x: &usize, y: &usize) -> Result<bool, UnionFindError> {
        self.check(*x)?;
        self.check(*y)?;
        Ok(self.union(*x, *y))
    }

    fn connected(&mut self, x: &usize, y: &usize) -> Result<bool, UnionFindError> {
        self.check(*x)?;
        self.check(*y)?;
        Ok(self.connected(*x, *y))
    }

    fn groups(&self) -> usize {
        self.groups
    }
}
