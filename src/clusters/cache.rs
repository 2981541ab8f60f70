//! Lazy, memoized loading of cluster tables.
//!
//! The cache is constructed once by the pipeline driver and passed by
//! reference into generator dispatch. Each distinct table is parsed on first
//! access and kept for the rest of the run; it is never invalidated. Table
//! files may be plain text or gzip, detected by magic bytes.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use flate2::read::GzDecoder;

use super::reader::{BrownTable, DavidTable, GoogleTable};
use crate::config::ClusterConfig;

/// Identity of a size-partitioned Brown-style table family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterFamily {
    Brown,
    PubmedBrown,
}

impl ClusterFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterFamily::Brown => "brown",
            ClusterFamily::PubmedBrown => "pubmed_brown",
        }
    }
}

impl fmt::Display for ClusterFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Memoized cluster table store, keyed by table identity.
pub struct ClusterCache {
    config: ClusterConfig,
    brown: HashMap<(ClusterFamily, u32), BrownTable>,
    david: Option<DavidTable>,
    google: Option<GoogleTable>,
    loads: usize,
}

impl ClusterCache {
    pub fn new(config: ClusterConfig) -> Self {
        Self {
            config,
            brown: HashMap::new(),
            david: None,
            google: None,
            loads: 0,
        }
    }

    /// Number of backing-file parses performed so far. Every table is loaded
    /// at most once per run.
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// The size-`size` table of a Brown-style family, loading it on first
    /// access.
    pub fn brown(&mut self, family: ClusterFamily, size: u32) -> Result<&BrownTable> {
        match self.brown.entry((family, size)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(slot) => {
                let path = self.config.brown_path(family, size).ok_or_else(|| {
                    anyhow!("no {}-{} cluster table configured", family, size)
                })?;
                let lines = read_table_lines(path)?;
                self.loads += 1;
                let table = BrownTable::parse(&lines)
                    .with_context(|| format!("malformed cluster table {}", path.display()))?;
                log::info!(
                    "loaded {}-{} cluster table from {} ({} tokens)",
                    family,
                    size,
                    path.display(),
                    table.len()
                );
                Ok(slot.insert(table))
            }
        }
    }

    /// The David cluster table, loading it on first access.
    pub fn david(&mut self) -> Result<&DavidTable> {
        if self.david.is_none() {
            let path = self
                .config
                .david_path()
                .ok_or_else(|| anyhow!("no david cluster table configured"))?;
            let lines = read_table_lines(path)?;
            self.loads += 1;
            let table = DavidTable::parse(&lines)
                .with_context(|| format!("malformed cluster table {}", path.display()))?;
            log::info!(
                "loaded david cluster table from {} ({} tokens)",
                path.display(),
                table.len()
            );
            self.david = Some(table);
        }
        // Populated just above when absent.
        Ok(self.david.as_ref().expect("david table present after load"))
    }

    /// The Google phrase cluster table, loading it on first access.
    pub fn google(&mut self) -> Result<&GoogleTable> {
        if self.google.is_none() {
            let path = self
                .config
                .google_path()
                .ok_or_else(|| anyhow!("no phrase cluster table configured"))?;
            let lines = read_table_lines(path)?;
            self.loads += 1;
            let table = GoogleTable::parse(&lines)
                .with_context(|| format!("malformed cluster table {}", path.display()))?;
            log::info!(
                "loaded phrase cluster table from {} ({} tokens)",
                path.display(),
                table.len()
            );
            self.google = Some(table);
        }
        // Populated just above when absent.
        Ok(self.google.as_ref().expect("google table present after load"))
    }
}

/// Read all lines of a table file, transparently decompressing gzip. The
/// format is detected from the magic bytes, not the file extension.
fn read_table_lines(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open cluster table {}", path.display()))?;

    let mut magic = [0u8; 2];
    let read = file.read(&mut magic)?;

    let file = File::open(path)?;
    let lines: io::Result<Vec<String>> = if read == 2 && magic == [0x1f, 0x8b] {
        BufReader::new(GzDecoder::new(file)).lines().collect()
    } else {
        BufReader::new(file).lines().collect()
    };

    lines.with_context(|| format!("failed to read cluster table {}", path.display()))
}
