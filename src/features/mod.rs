//! Feature set tags and generator dispatch.
//!
//! The tag set is closed: `bow`, `comp`, `google`, `david`, and the two
//! size-partitioned Brown-style families `brown-{4,6,10,20}` and
//! `pubmed_brown-{4,6,10,20}`.

pub mod generators;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;

use crate::clusters::{ClusterCache, ClusterFamily};
use crate::graph::{NodeId, TokenGraph};

/// Prefix lengths from Turian et al. (2010).
pub const BROWN_GRAMS: [usize; 4] = [4, 6, 10, 20];

/// Cluster sizes both Brown-style families are published in.
pub const BROWN_SIZES: [u32; 4] = [4, 6, 10, 20];

/// One selectable feature set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureSet {
    Bow,
    Comp,
    Google,
    David,
    Brown(u32),
    PubmedBrown(u32),
}

impl FeatureSet {
    /// Every valid tag, in the order used for help output.
    pub fn all() -> Vec<FeatureSet> {
        let mut all = vec![
            FeatureSet::Bow,
            FeatureSet::Comp,
            FeatureSet::Google,
            FeatureSet::David,
        ];
        all.extend(BROWN_SIZES.iter().map(|&size| FeatureSet::Brown(size)));
        all.extend(BROWN_SIZES.iter().map(|&size| FeatureSet::PubmedBrown(size)));
        all
    }

    /// Whether this feature set references an external cluster table.
    pub fn needs_clusters(&self) -> bool {
        !matches!(self, FeatureSet::Bow | FeatureSet::Comp)
    }

    /// Parse a tag from the closed set. The error message lists the valid
    /// tags, which makes this directly usable as a clap value parser.
    pub fn parse(s: &str) -> Result<Self, String> {
        if let Some(size) = s.strip_prefix("pubmed_brown-") {
            return parse_size(size, s).map(FeatureSet::PubmedBrown);
        }
        if let Some(size) = s.strip_prefix("brown-") {
            return parse_size(size, s).map(FeatureSet::Brown);
        }
        match s {
            "bow" => Ok(FeatureSet::Bow),
            "comp" => Ok(FeatureSet::Comp),
            "google" => Ok(FeatureSet::Google),
            "david" => Ok(FeatureSet::David),
            _ => Err(unknown_tag(s)),
        }
    }

    /// Run this feature set's generator over one window graph.
    pub fn generate(
        &self,
        graph: &TokenGraph,
        focus: NodeId,
        cache: &mut ClusterCache,
    ) -> Result<Vec<(String, f64)>> {
        match self {
            FeatureSet::Bow => Ok(generators::bow(graph, focus)),
            FeatureSet::Comp => Ok(generators::comp(graph, focus)),
            FeatureSet::Google => generators::google(graph, focus, cache),
            FeatureSet::David => generators::david(graph, focus, cache),
            FeatureSet::Brown(size) => {
                generators::brown(graph, focus, cache, ClusterFamily::Brown, *size)
            }
            FeatureSet::PubmedBrown(size) => {
                generators::brown(graph, focus, cache, ClusterFamily::PubmedBrown, *size)
            }
        }
    }
}

fn parse_size(size: &str, tag: &str) -> Result<u32, String> {
    match size.parse::<u32>() {
        Ok(size) if BROWN_SIZES.contains(&size) => Ok(size),
        _ => Err(unknown_tag(tag)),
    }
}

fn unknown_tag(s: &str) -> String {
    let valid: Vec<String> = FeatureSet::all().iter().map(|f| f.to_string()).collect();
    format!("unknown feature set '{}', expected one of: {}", s, valid.join(", "))
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureSet::Bow => write!(f, "bow"),
            FeatureSet::Comp => write!(f, "comp"),
            FeatureSet::Google => write!(f, "google"),
            FeatureSet::David => write!(f, "david"),
            FeatureSet::Brown(size) => write!(f, "brown-{}", size),
            FeatureSet::PubmedBrown(size) => write!(f, "pubmed_brown-{}", size),
        }
    }
}

impl FromStr for FeatureSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureSet::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for f_set in FeatureSet::all() {
            assert_eq!(FeatureSet::parse(&f_set.to_string()), Ok(f_set));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_tags() {
        assert!(FeatureSet::parse("bag-of-words").is_err());
        assert!(FeatureSet::parse("brown-5").is_err());
        assert!(FeatureSet::parse("brown-").is_err());
        assert!(FeatureSet::parse("pubmed_brown-21").is_err());
        let err = FeatureSet::parse("nope").unwrap_err();
        assert!(err.contains("pubmed_brown-20"));
    }

    #[test]
    fn test_needs_clusters() {
        assert!(!FeatureSet::Bow.needs_clusters());
        assert!(!FeatureSet::Comp.needs_clusters());
        assert!(FeatureSet::Google.needs_clusters());
        assert!(FeatureSet::Brown(4).needs_clusters());
    }
}
