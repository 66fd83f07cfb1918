// file: src/pdf/lopdf_backend.rs
// description: lopdf implementation of the pdf interface
// reference: https://docs.rs/lopdf

use crate::error::{ExtractorError, Result};
use crate::pdf::{PdfBackend, PdfDocument};
use lopdf::Document;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for LopdfBackend {
    fn open_document(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>> {
        let document = Document::load_mem(bytes)
            .map_err(|e| ExtractorError::Parse(format!("Failed to load PDF: {}", e)))?;

        Ok(Box::new(LopdfDocument { document }))
    }
}

pub struct LopdfDocument {
    document: Document,
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    fn page_text(&self, page_number: u32) -> Result<String> {
        self.document.extract_text(&[page_number]).map_err(|e| {
            ExtractorError::Parse(format!(
                "Failed to extract text from page {}: {}",
                page_number, e
            ))
        })
    }

    fn copy_pages(&self, page_numbers: &[u32]) -> Result<Vec<u8>> {
        if page_numbers.is_empty() {
            return Err(ExtractorError::Assembly("No pages requested".to_string()));
        }

        if !page_numbers.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(ExtractorError::Assembly(format!(
                "Page numbers must be ascending and unique: {:?}",
                page_numbers
            )));
        }

        let total = self.page_count();
        if let Some(page) = page_numbers.iter().find(|p| **p == 0 || **p > total) {
            return Err(ExtractorError::Assembly(format!(
                "Page {} is outside the document (1-{})",
                page, total
            )));
        }

        let keep: BTreeSet<u32> = page_numbers.iter().copied().collect();
        let discard: Vec<u32> = (1..=total).filter(|p| !keep.contains(p)).collect();

        let mut copy = self.document.clone();
        copy.delete_pages(&discard);
        let pruned = copy.prune_objects();
        copy.renumber_objects();
        copy.compress();

        debug!(
            "Copied {} of {} pages, pruned {} objects",
            keep.len(),
            total,
            pruned.len()
        );

        let mut output = Vec::new();
        copy.save_to(&mut output)
            .map_err(|e| ExtractorError::Assembly(format!("Failed to save PDF: {}", e)))?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::fixtures::build_pdf;

    #[test]
    fn test_open_and_read_pages() {
        let bytes = build_pdf(&["Compiler Design 21CS302", "Unit 1 Lexical analysis"]);
        let document = LopdfBackend::new().open_document(&bytes).unwrap();

        assert_eq!(document.page_count(), 2);
        assert!(document.page_text(1).unwrap().contains("Compiler Design"));
        assert!(document.page_text(2).unwrap().contains("Lexical analysis"));
    }

    #[test]
    fn test_open_rejects_garbage() {
        let result = LopdfBackend::new().open_document(b"definitely not a pdf");
        assert!(matches!(result, Err(ExtractorError::Parse(_))));
    }

    #[test]
    fn test_copy_pages_keeps_requested_pages_in_order() {
        let bytes = build_pdf(&["page one", "page two", "page three", "page four"]);
        let document = LopdfBackend::new().open_document(&bytes).unwrap();

        let copied = document.copy_pages(&[2, 4]).unwrap();
        let reopened = LopdfBackend::new().open_document(&copied).unwrap();

        assert_eq!(reopened.page_count(), 2);
        assert!(reopened.page_text(1).unwrap().contains("page two"));
        assert!(reopened.page_text(2).unwrap().contains("page four"));
    }

    #[test]
    fn test_copy_pages_rejects_bad_requests() {
        let bytes = build_pdf(&["only page"]);
        let document = LopdfBackend::new().open_document(&bytes).unwrap();

        assert!(matches!(
            document.copy_pages(&[]),
            Err(ExtractorError::Assembly(_))
        ));
        assert!(matches!(
            document.copy_pages(&[2]),
            Err(ExtractorError::Assembly(_))
        ));
        assert!(matches!(
            document.copy_pages(&[0]),
            Err(ExtractorError::Assembly(_))
        ));
    }
}
