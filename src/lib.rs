pub mod clusters;
pub mod config;
pub mod features;
pub mod graph;
pub mod pipeline;
pub mod tokenize;

/// Fixed context radius: tokens further than this from the focus, in either
/// direction, are invisible to every feature generator.
pub const CONTEXT_RADIUS: usize = 3;

pub use clusters::{BrownTable, ClusterCache, ClusterFamily, DavidTable, GoogleTable};
pub use config::ClusterConfig;
pub use features::FeatureSet;
pub use graph::{EdgeLabel, SeqLblSearch, TokenGraph, WalkStep};
pub use pipeline::{Featuriser, Record, RunStats, FOCUS_SENTINEL};
pub use tokenize::tokenize;
