//! Constrained directional path search over the token chain.
//!
//! A `SeqLblSearch` is an immutable sequence of directions to follow from a
//! start node. `TokenGraph::walk` turns it into a lazy iterator of
//! `WalkStep`s, one per traversable prefix length, halting without error at
//! the first missing edge. Each walk allocates fresh iteration state, so the
//! same start node can be walked with different searches without
//! interference.

use super::chain::{EdgeLabel, NodeId, TokenGraph};

/// An immutable specification of directions to follow, e.g. `PRV,PRV,PRV`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqLblSearch {
    labels: Vec<EdgeLabel>,
}

impl SeqLblSearch {
    pub fn new<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = EdgeLabel>,
    {
        Self {
            labels: labels.into_iter().collect(),
        }
    }

    /// A search that follows the same direction `depth` times.
    pub fn repeated(label: EdgeLabel, depth: usize) -> Self {
        Self {
            labels: vec![label; depth],
        }
    }

    pub fn labels(&self) -> &[EdgeLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One step of a walk: where it started, the label path consumed so far, and
/// the node it reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkStep<'s> {
    pub origin: NodeId,
    pub path: &'s [EdgeLabel],
    pub node: NodeId,
}

/// Lazy walk iterator. Yields one `WalkStep` per achievable prefix length of
/// the search, in increasing length order.
pub struct Walk<'g, 's> {
    graph: &'g TokenGraph,
    search: &'s SeqLblSearch,
    origin: NodeId,
    current: NodeId,
    taken: usize,
}

impl<'g, 's> Iterator for Walk<'g, 's> {
    type Item = WalkStep<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        let label = *self.search.labels().get(self.taken)?;
        let next = self.graph.lookup(self.current, label)?;
        self.taken += 1;
        self.current = next;
        Some(WalkStep {
            origin: self.origin,
            path: &self.search.labels()[..self.taken],
            node: next,
        })
    }
}

impl TokenGraph {
    /// Walk from `start` following `search`, one step per edge that exists.
    /// Reaching the chain boundary early is normal, not a failure.
    pub fn walk<'g, 's>(&'g self, start: NodeId, search: &'s SeqLblSearch) -> Walk<'g, 's> {
        Walk {
            graph: self,
            search,
            origin: start,
            current: start,
            taken: 0,
        }
    }
}
