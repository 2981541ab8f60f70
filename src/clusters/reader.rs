//! Cluster table readers.
//!
//! Three line-oriented, tab-separated formats:
//!
//! - Brown-style hierarchical clusters: `bit-path TAB token [TAB frequency]`,
//!   one token per line; lookup returns the bit-path string.
//! - David clusters: `token TAB cluster-id`; lookup returns the cluster-id.
//! - Google phrase clusters: `token TAB cluster:distance [TAB ...]`; lookup
//!   returns the (cluster, distance) pairs in file order.
//!
//! A token missing from a table is an expected lookup miss (`None`), never an
//! error. A malformed line is a `ClusterError` and makes the whole table
//! unusable. When a token appears on more than one line, the first entry
//! wins.

use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while parsing a cluster table.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("line {line}: expected at least {expected} tab-separated columns, found {found}")]
    Columns {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: malformed cluster pair '{pair}'")]
    Pair { line: usize, pair: String },

    #[error("line {line}: invalid cluster distance '{value}'")]
    Distance { line: usize, value: String },
}

/// Token to hierarchical bit-path, shared by both Brown-style families.
#[derive(Debug, Default, Clone)]
pub struct BrownTable {
    by_token: HashMap<String, String>,
}

impl BrownTable {
    pub fn parse<I, S>(lines: I) -> Result<Self, ClusterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_token = HashMap::new();
        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.is_empty() {
                continue;
            }
            let mut cols = line.split('\t');
            match (cols.next(), cols.next()) {
                (Some(path), Some(token)) => {
                    by_token
                        .entry(token.to_string())
                        .or_insert_with(|| path.to_string());
                }
                _ => {
                    return Err(ClusterError::Columns {
                        line: idx + 1,
                        expected: 2,
                        found: line.split('\t').count(),
                    });
                }
            }
        }
        Ok(Self { by_token })
    }

    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.by_token.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

/// Token to flat cluster id.
#[derive(Debug, Default, Clone)]
pub struct DavidTable {
    by_token: HashMap<String, String>,
}

impl DavidTable {
    pub fn parse<I, S>(lines: I) -> Result<Self, ClusterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_token = HashMap::new();
        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.is_empty() {
                continue;
            }
            let mut cols = line.split('\t');
            match (cols.next(), cols.next()) {
                (Some(token), Some(cluster)) => {
                    by_token
                        .entry(token.to_string())
                        .or_insert_with(|| cluster.to_string());
                }
                _ => {
                    return Err(ClusterError::Columns {
                        line: idx + 1,
                        expected: 2,
                        found: line.split('\t').count(),
                    });
                }
            }
        }
        Ok(Self { by_token })
    }

    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.by_token.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

/// Token to a set of weighted cluster candidates.
#[derive(Debug, Default, Clone)]
pub struct GoogleTable {
    by_token: HashMap<String, Vec<(String, f64)>>,
}

impl GoogleTable {
    pub fn parse<I, S>(lines: I) -> Result<Self, ClusterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut by_token = HashMap::new();
        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.is_empty() {
                continue;
            }
            let mut cols = line.split('\t');
            let token = match cols.next() {
                Some(token) if !token.is_empty() => token,
                _ => {
                    return Err(ClusterError::Columns {
                        line: idx + 1,
                        expected: 2,
                        found: line.split('\t').count(),
                    });
                }
            };

            let mut pairs = Vec::new();
            for pair in cols {
                let (cluster, distance) = pair.rsplit_once(':').ok_or_else(|| {
                    ClusterError::Pair {
                        line: idx + 1,
                        pair: pair.to_string(),
                    }
                })?;
                let distance: f64 =
                    distance.parse().map_err(|_| ClusterError::Distance {
                        line: idx + 1,
                        value: distance.to_string(),
                    })?;
                pairs.push((cluster.to_string(), distance));
            }
            if pairs.is_empty() {
                return Err(ClusterError::Columns {
                    line: idx + 1,
                    expected: 2,
                    found: 1,
                });
            }
            by_token.entry(token.to_string()).or_insert(pairs);
        }
        Ok(Self { by_token })
    }

    pub fn lookup(&self, token: &str) -> Option<&[(String, f64)]> {
        self.by_token.get(token).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}
