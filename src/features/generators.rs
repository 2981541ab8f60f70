//! Feature generator implementations.
//!
//! Every generator maps one window graph and its focus node to a sequence of
//! (name, weight) pairs. The focus-relative generators share a single walk
//! pattern: up to `CONTEXT_RADIUS` steps backward, then up to
//! `CONTEXT_RADIUS` steps forward. A cluster-table miss for a node is silent
//! and never stops generation for the remaining nodes.

use anyhow::Result;

use super::BROWN_GRAMS;
use crate::clusters::{ClusterCache, ClusterFamily};
use crate::graph::{EdgeLabel, NodeId, SeqLblSearch, TokenGraph};
use crate::CONTEXT_RADIUS;

/// Token gram width used by the `comp` feature set.
const TOKEN_GRAM_SIZE: usize = 3;

fn join_path(path: &[EdgeLabel]) -> String {
    path.iter()
        .map(EdgeLabel::as_str)
        .collect::<Vec<_>>()
        .join("-")
}

/// Both context walks, as (label path, depth, reached node) triples in step
/// order.
fn context_steps(graph: &TokenGraph, focus: NodeId) -> Vec<(String, usize, NodeId)> {
    let back = SeqLblSearch::repeated(EdgeLabel::Prv, CONTEXT_RADIUS);
    let forth = SeqLblSearch::repeated(EdgeLabel::Nxt, CONTEXT_RADIUS);

    let mut steps = Vec::new();
    for step in graph.walk(focus, &back) {
        steps.push((join_path(step.path), step.path.len(), step.node));
    }
    for step in graph.walk(focus, &forth) {
        steps.push((join_path(step.path), step.path.len(), step.node));
    }
    steps
}

/// Bag of words over the visible context.
pub fn bow(graph: &TokenGraph, focus: NodeId) -> Vec<(String, f64)> {
    let mut feats = Vec::new();
    for (_, _, node) in context_steps(graph, focus) {
        feats.push((format!("BOW-{}", graph.value(node)), 1.0));
    }
    feats
}

/// Positionally weighted context tokens plus token grams over the whole
/// window.
pub fn comp(graph: &TokenGraph, focus: NodeId) -> Vec<(String, f64)> {
    let mut feats = Vec::new();

    for (path, depth, node) in context_steps(graph, focus) {
        let name = format!("WEIGHTED-POSITIONAL-{}-{}", path, graph.value(node));
        let weight = 1.0 / 2f64.powi(depth as i32 - 1);
        feats.push((name, weight));
    }

    // Token grams run over the full window, focus sentinel included.
    for gram in graph.tokens().windows(TOKEN_GRAM_SIZE) {
        feats.push((
            format!("TOK-GRAM-{}-{}", TOKEN_GRAM_SIZE, gram.join("-")),
            1.0,
        ));
    }

    feats
}

/// Brown-style hierarchical cluster features for one (family, size) table.
///
/// The prefix-length check only gates whether anything is emitted for a node;
/// the emitted feature always carries the full cluster code.
pub fn brown(
    graph: &TokenGraph,
    focus: NodeId,
    cache: &mut ClusterCache,
    family: ClusterFamily,
    size: u32,
) -> Result<Vec<(String, f64)>> {
    let table = cache.brown(family, size)?;

    let mut feats = Vec::new();
    for (path, _, node) in context_steps(graph, focus) {
        if let Some(cluster) = table.lookup(graph.value(node)) {
            for &gram in BROWN_GRAMS.iter() {
                if cluster.len() < gram {
                    // Don't overgenerate if we don't have enough grams.
                    break;
                }
                feats.push((format!("BROWN-{}-{}-{}", size, path, cluster), 1.0));
            }
        }
    }
    Ok(feats)
}

/// Flat cluster features from the David table.
pub fn david(
    graph: &TokenGraph,
    focus: NodeId,
    cache: &mut ClusterCache,
) -> Result<Vec<(String, f64)>> {
    let table = cache.david()?;

    let mut feats = Vec::new();
    for (path, _, node) in context_steps(graph, focus) {
        if let Some(cluster) = table.lookup(graph.value(node)) {
            feats.push((format!("DAVID-{}-{}", path, cluster), 1.0));
        }
    }
    Ok(feats)
}

/// Weighted phrase cluster features from the Google table, one per
/// (cluster, distance) candidate.
pub fn google(
    graph: &TokenGraph,
    focus: NodeId,
    cache: &mut ClusterCache,
) -> Result<Vec<(String, f64)>> {
    let table = cache.google()?;

    let mut feats = Vec::new();
    for (path, _, node) in context_steps(graph, focus) {
        if let Some(pairs) = table.lookup(graph.value(node)) {
            for (cluster, distance) in pairs {
                feats.push((format!("GOOGLE-{}-{}", path, cluster), *distance));
            }
        }
    }
    Ok(feats)
}
