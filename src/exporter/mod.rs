// file: src/exporter/mod.rs
// description: pdf assembly and download storage module exports
// reference: internal module structure

pub mod pdf;
pub mod store;

pub use pdf::PdfAssembler;
pub use store::DownloadStore;
