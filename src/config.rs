//! Cluster table path configuration.
//!
//! Loaded from a YAML file at startup. Every entry is optional; only the
//! tables the selected feature sets actually reference are ever read or
//! validated, so a run with `bow`/`comp` alone needs no configuration file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::clusters::ClusterFamily;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ClusterConfig {
    /// Brown cluster table paths keyed by cluster size.
    #[serde(default)]
    pub brown_clusters_by_size: BTreeMap<u32, PathBuf>,

    /// PubMed-trained Brown cluster table paths keyed by cluster size.
    #[serde(default)]
    pub pubmed_brown_clusters_by_size: BTreeMap<u32, PathBuf>,

    #[serde(default)]
    pub david_clusters_path: Option<PathBuf>,

    #[serde(default)]
    pub phrase_clusters_path: Option<PathBuf>,
}

impl ClusterConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow!("Cluster config file not found: {}", path.display()));
        }

        let yaml_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read cluster config {}", path.display()))?;

        let config: ClusterConfig = serde_yaml::from_str(&yaml_str)
            .with_context(|| format!("Invalid YAML cluster config in {}", path.display()))?;

        Ok(config)
    }

    /// Path of the size-`size` table of a Brown-style family, if configured.
    pub fn brown_path(&self, family: ClusterFamily, size: u32) -> Option<&Path> {
        let by_size = match family {
            ClusterFamily::Brown => &self.brown_clusters_by_size,
            ClusterFamily::PubmedBrown => &self.pubmed_brown_clusters_by_size,
        };
        by_size.get(&size).map(PathBuf::as_path)
    }

    pub fn david_path(&self) -> Option<&Path> {
        self.david_clusters_path.as_deref()
    }

    pub fn google_path(&self) -> Option<&Path> {
        self.phrase_clusters_path.as_deref()
    }
}
