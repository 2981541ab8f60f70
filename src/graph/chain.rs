//! Linear token chain with labelled directional edges.
//!
//! One `TokenGraph` covers exactly one context window: one node per token,
//! consecutive nodes linked forward with `NXT` and backward with `PRV`.
//! The graph is built once and read-only afterwards.

use std::fmt;

/// Direction label on a chain edge. Every node carries at most one outgoing
/// edge per label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeLabel {
    Prv,
    Nxt,
}

impl EdgeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeLabel::Prv => "PRV",
            EdgeLabel::Nxt => "NXT",
        }
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nodes are addressed by their position in the window token sequence.
pub type NodeId = usize;

/// Doubly-linked chain over the tokens of one window.
#[derive(Debug, Clone)]
pub struct TokenGraph {
    values: Vec<String>,
    prv: Vec<Option<NodeId>>,
    nxt: Vec<Option<NodeId>>,
}

impl TokenGraph {
    /// Build the chain: one node per token, consecutive nodes linked in both
    /// directions. No edges beyond the first and last node.
    pub fn build<I>(tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let values: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let len = values.len();
        let mut prv = vec![None; len];
        let mut nxt = vec![None; len];
        for i in 1..len {
            prv[i] = Some(i - 1);
            nxt[i - 1] = Some(i);
        }
        Self { values, prv, nxt }
    }

    /// Node ids in window order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        0..self.values.len()
    }

    /// Token value of a node.
    pub fn value(&self, node: NodeId) -> &str {
        &self.values[node]
    }

    /// All window tokens in order.
    pub fn tokens(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The neighbour reached by following `label` out of `node`, if the edge
    /// exists. Boundary nodes have no edge in the outward direction.
    pub fn lookup(&self, node: NodeId, label: EdgeLabel) -> Option<NodeId> {
        match label {
            EdgeLabel::Prv => self.prv.get(node).copied().flatten(),
            EdgeLabel::Nxt => self.nxt.get(node).copied().flatten(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_links() {
        let graph = TokenGraph::build(["a", "b", "c"]);

        assert_eq!(graph.lookup(0, EdgeLabel::Nxt), Some(1));
        assert_eq!(graph.lookup(1, EdgeLabel::Nxt), Some(2));
        assert_eq!(graph.lookup(2, EdgeLabel::Prv), Some(1));
        assert_eq!(graph.lookup(1, EdgeLabel::Prv), Some(0));
    }

    #[test]
    fn test_chain_endpoints() {
        // Exactly one node lacks PRV and exactly one lacks NXT.
        let graph = TokenGraph::build(["a", "b", "c", "d"]);

        let no_prv: Vec<NodeId> = graph
            .nodes()
            .filter(|&n| graph.lookup(n, EdgeLabel::Prv).is_none())
            .collect();
        let no_nxt: Vec<NodeId> = graph
            .nodes()
            .filter(|&n| graph.lookup(n, EdgeLabel::Nxt).is_none())
            .collect();

        assert_eq!(no_prv, vec![0]);
        assert_eq!(no_nxt, vec![3]);
    }

    #[test]
    fn test_single_token_window() {
        let graph = TokenGraph::build(["only"]);

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.lookup(0, EdgeLabel::Prv), None);
        assert_eq!(graph.lookup(0, EdgeLabel::Nxt), None);
    }

    #[test]
    fn test_values_in_window_order() {
        let graph = TokenGraph::build(["x", "y"]);
        let values: Vec<&str> = graph.nodes().map(|n| graph.value(n)).collect();
        assert_eq!(values, vec!["x", "y"]);
    }
}
