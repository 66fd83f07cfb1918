// file: src/index/mod.rs
// description: page text index module exports
// reference: internal module structure

pub mod indexer;
pub mod progress;

pub use indexer::PageIndexer;
pub use progress::{IndexStats, ProgressTracker};
