pub mod cache;
pub mod reader;

pub use cache::{ClusterCache, ClusterFamily};
pub use reader::{BrownTable, ClusterError, DavidTable, GoogleTable};
