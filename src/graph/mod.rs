pub mod chain;
pub mod walk;

pub use chain::{EdgeLabel, NodeId, TokenGraph};
pub use walk::{SeqLblSearch, Walk, WalkStep};
