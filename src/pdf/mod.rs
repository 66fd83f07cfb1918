// file: src/pdf/mod.rs
// description: narrow pdf interface used by the page indexer and the assembler
// reference: internal module structure

pub mod lopdf_backend;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::error::Result;

pub use lopdf_backend::LopdfBackend;

/// An opened PDF. Page numbers are 1-indexed.
pub trait PdfDocument {
    fn page_count(&self) -> u32;

    fn page_text(&self, page_number: u32) -> Result<String>;

    /// Serializes a new document holding only `page_numbers`, which must be
    /// ascending and unique.
    fn copy_pages(&self, page_numbers: &[u32]) -> Result<Vec<u8>>;
}

pub trait PdfBackend: Send + Sync {
    fn open_document(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>>;
}
