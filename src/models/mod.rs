// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod match_result;
pub mod page;

pub use match_result::{MatchResult, PageMatch};
pub use page::{PageEntry, PageIndex};
