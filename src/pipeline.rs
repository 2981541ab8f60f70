//! Streaming featurisation pipeline.
//!
//! One tab-separated record in, at most one feature-vector line out. The
//! driver owns the cluster cache, so external tables are loaded once per run
//! no matter how many records or feature sets reference them.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use log::{info, warn};

use crate::clusters::ClusterCache;
use crate::config::ClusterConfig;
use crate::features::FeatureSet;
use crate::graph::{NodeId, TokenGraph};
use crate::tokenize::tokenize;
use crate::CONTEXT_RADIUS;

/// Sentinel token standing in for the classification target. The value only
/// has to be a token no real context will ever contain.
pub const FOCUS_SENTINEL: &str = "('^_^)WhatAmIDoingInAFeatureRepresentation?";

/// One input record: `id TAB label TAB left TAB unused TAB right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub label: String,
    pub left: String,
    pub right: String,
}

impl Record {
    /// Parse a record line. Any column count other than five is an error.
    pub fn parse(line: &str) -> Result<Self> {
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() != 5 {
            bail!("expected 5 tab-separated columns, found {}", cols.len());
        }
        Ok(Self {
            id: cols[0].to_string(),
            label: cols[1].to_string(),
            left: cols[2].to_string(),
            right: cols[4].to_string(),
        })
    }
}

/// The fixed-radius window: the last `CONTEXT_RADIUS` left-context tokens,
/// the focus sentinel, the first `CONTEXT_RADIUS` right-context tokens.
pub fn context_window(left: &[String], right: &[String]) -> Vec<String> {
    let skip = left.len().saturating_sub(CONTEXT_RADIUS);
    let mut window: Vec<String> = left[skip..].to_vec();
    window.push(FOCUS_SENTINEL.to_string());
    window.extend(right.iter().take(CONTEXT_RADIUS).cloned());
    window
}

/// Counters for one pipeline run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub records: usize,
    pub emitted: usize,
    pub skipped: usize,
}

/// Streaming driver: builds the window graph per record, dispatches the
/// requested feature sets and merges their output.
pub struct Featuriser {
    feature_sets: Vec<FeatureSet>,
    cache: ClusterCache,
}

impl Featuriser {
    pub fn new(feature_sets: Vec<FeatureSet>, config: ClusterConfig) -> Result<Self> {
        if feature_sets.is_empty() {
            bail!("at least one feature set must be selected");
        }
        Ok(Self {
            feature_sets,
            cache: ClusterCache::new(config),
        })
    }

    pub fn cache(&self) -> &ClusterCache {
        &self.cache
    }

    /// Featurise one record into its merged feature vector. Later writes
    /// overwrite earlier ones, across and within feature sets, in request
    /// order then emission order.
    pub fn featurise(&mut self, record: &Record) -> Result<BTreeMap<String, f64>> {
        let left = tokenize(record.left.trim());
        let right = tokenize(record.right.trim());

        let window = context_window(&left, &right);
        let graph = TokenGraph::build(window);
        let focus = find_focus(&graph);

        let mut vector = BTreeMap::new();
        for f_set in &self.feature_sets {
            for (name, value) in f_set.generate(&graph, focus, &mut self.cache)? {
                vector.insert(name, value);
            }
        }
        Ok(vector)
    }

    /// Run over every input line. Records yielding an empty vector are
    /// skipped with a warning; a malformed record aborts the run.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<RunStats> {
        let mut stats = RunStats::default();

        for (line_no, line) in input.lines().enumerate() {
            let line = line?;
            let record = Record::parse(&line)
                .with_context(|| format!("malformed input on line {}", line_no + 1))?;
            stats.records += 1;

            let vector = self.featurise(&record)?;
            if vector.is_empty() {
                warn!("no features generated for record '{}', skipping", record.id);
                stats.skipped += 1;
                continue;
            }

            write_vector(output, &record.label, &vector)?;
            stats.emitted += 1;
        }

        info!(
            "featurised {} records: {} emitted, {} skipped",
            stats.records, stats.emitted, stats.skipped
        );
        Ok(stats)
    }
}

/// Locate the focus sentinel node. The window builder always inserts exactly
/// one, so a miss is a construction bug, not a data problem.
fn find_focus(graph: &TokenGraph) -> NodeId {
    graph
        .nodes()
        .find(|&n| graph.value(n) == FOCUS_SENTINEL)
        .expect("focus sentinel missing from window graph")
}

/// Render a feature weight. Pinned so output stays byte-comparable:
/// integral values get one decimal place, everything else the shortest
/// exact representation.
pub fn fmt_weight(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn write_vector<W: Write>(out: &mut W, label: &str, vector: &BTreeMap<String, f64>) -> Result<()> {
    write!(out, "{}\t", label)?;
    let mut first = true;
    for (name, value) in vector {
        if !first {
            write!(out, " ")?;
        }
        write!(out, "{}:{}", name, fmt_weight(*value))?;
        first = false;
    }
    writeln!(out)?;
    Ok(())
}
