// file: src/exporter/pdf.rs
// description: assembles the matched pages into a new, smaller pdf
// reference: https://docs.rs/lopdf

use crate::error::{ExtractorError, Result};
use crate::pdf::PdfBackend;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

pub struct PdfAssembler {
    backend: Arc<dyn PdfBackend>,
}

impl PdfAssembler {
    pub fn new(backend: Arc<dyn PdfBackend>) -> Self {
        Self { backend }
    }

    /// Copies `page_numbers` out of `source` in ascending order, duplicates
    /// collapsed. The result is reopened and its page count checked before
    /// it is returned. Blocking.
    pub fn assemble(&self, source: &[u8], page_numbers: &[u32]) -> Result<Vec<u8>> {
        let pages: Vec<u32> = page_numbers
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if pages.is_empty() {
            return Err(ExtractorError::Assembly(
                "Nothing to assemble: no pages selected".to_string(),
            ));
        }

        let document = self
            .backend
            .open_document(source)
            .map_err(|e| ExtractorError::Assembly(format!("Cannot reopen source: {}", e)))?;

        let output = document.copy_pages(&pages)?;

        let written = self.backend.open_document(&output).map_err(|e| {
            ExtractorError::Assembly(format!("Assembled PDF does not open: {}", e))
        })?;

        if written.page_count() as usize != pages.len() {
            return Err(ExtractorError::Assembly(format!(
                "Assembled PDF has {} pages, expected {}",
                written.page_count(),
                pages.len()
            )));
        }

        debug!("Assembled {} pages into {} bytes", pages.len(), output.len());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::LopdfBackend;
    use crate::pdf::fixtures::build_pdf;
    use pretty_assertions::assert_eq;

    fn assembler() -> PdfAssembler {
        PdfAssembler::new(Arc::new(LopdfBackend::new()))
    }

    fn source() -> Vec<u8> {
        build_pdf(&[
            "Theory of Computation 21CS304",
            "Unit 1 finite automata",
            "Unit 2 regular expressions",
            "Artificial Intelligence 21CS402",
        ])
    }

    #[test]
    fn test_assembled_pages_match_source_pages() {
        let output = assembler().assemble(&source(), &[1, 2]).unwrap();

        let document = LopdfBackend::new().open_document(&output).unwrap();
        assert_eq!(document.page_count(), 2);
        assert!(document.page_text(1).unwrap().contains("Theory of Computation"));
        assert!(document.page_text(2).unwrap().contains("finite automata"));
    }

    #[test]
    fn test_unsorted_duplicate_pages_are_normalized() {
        let output = assembler().assemble(&source(), &[4, 2, 4]).unwrap();

        let document = LopdfBackend::new().open_document(&output).unwrap();
        assert_eq!(document.page_count(), 2);
        assert!(document.page_text(1).unwrap().contains("finite automata"));
        assert!(document.page_text(2).unwrap().contains("Artificial Intelligence"));
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        assert!(matches!(
            assembler().assemble(&source(), &[]),
            Err(ExtractorError::Assembly(_))
        ));
    }

    #[test]
    fn test_out_of_range_page_is_rejected() {
        assert!(matches!(
            assembler().assemble(&source(), &[3, 9]),
            Err(ExtractorError::Assembly(_))
        ));
    }

    #[test]
    fn test_unreadable_source_is_assembly_error() {
        assert!(matches!(
            assembler().assemble(b"not a pdf", &[1]),
            Err(ExtractorError::Assembly(_))
        ));
    }
}
