// file: src/source/mod.rs
// description: syllabus retrieval and caching module exports
// reference: internal module structure

pub mod cache;
pub mod fetcher;

pub use cache::{DocumentCache, LoadedSyllabus};
pub use fetcher::{DocumentSource, HttpSource, LayeredSource, LocalFileSource, source_from_config};
