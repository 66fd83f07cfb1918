// file: src/pipeline/mod.rs
// description: syllabus service module exports
// reference: internal module structure

mod service;

pub use service::{SearchOutcome, ServiceHealth, SyllabusService};
