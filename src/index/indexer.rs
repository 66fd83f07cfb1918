// file: src/index/indexer.rs
// description: extracts plain text from every page of the syllabus once
// reference: per-page text extraction over the pdf interface

use crate::config::MatcherConfig;
use crate::error::Result;
use crate::index::progress::{IndexStats, ProgressTracker};
use crate::matcher::patterns::course_code_regex;
use crate::models::PageIndex;
use crate::pdf::PdfBackend;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PageIndexer {
    backend: Arc<dyn PdfBackend>,
    course_code: Regex,
    show_progress: bool,
    colored: bool,
}

impl PageIndexer {
    /// Header pages are counted with the same course-code pattern the matcher boosts on.
    pub fn new(backend: Arc<dyn PdfBackend>, config: &MatcherConfig) -> Result<Self> {
        Ok(Self {
            backend,
            course_code: course_code_regex(&config.course_code_pattern)?,
            show_progress: false,
            colored: false,
        })
    }

    pub fn with_progress(mut self, colored: bool) -> Self {
        self.show_progress = true;
        self.colored = colored;
        self
    }

    /// Blocking; run it off the async executor. A page whose text cannot be
    /// extracted is indexed as empty instead of failing the whole document.
    pub fn build(&self, bytes: &[u8]) -> Result<(PageIndex, IndexStats)> {
        let document = self.backend.open_document(bytes)?;
        let total = document.page_count();

        if total == 0 {
            warn!("Syllabus document has no pages");
        }

        let tracker = if self.show_progress {
            ProgressTracker::with_color(total, self.colored)
        } else {
            ProgressTracker::hidden(total)
        };

        let mut texts = Vec::with_capacity(total as usize);
        for page_number in 1..=total {
            match document.page_text(page_number) {
                Ok(text) => {
                    tracker.inc_extracted();
                    texts.push(text);
                }
                Err(e) => {
                    warn!("Indexing page {} as empty: {}", page_number, e);
                    tracker.inc_failed();
                    texts.push(String::new());
                }
            }
        }
        tracker.finish();

        let index = PageIndex::from_texts(texts);
        let header_pages = index
            .iter()
            .filter(|entry| self.course_code.is_match(entry.normalized()))
            .count();

        let stats = IndexStats {
            pages: total,
            failed: tracker.failed(),
            blank: index.blank_pages() as u32,
            header_pages: header_pages as u32,
            duration_ms: tracker.elapsed_ms(),
        };

        debug!("Blank pages: {}, header pages: {}", stats.blank, stats.header_pages);
        info!(
            "Indexed {} pages ({} failed) in {}ms",
            stats.pages, stats.failed, stats.duration_ms
        );

        Ok((index, stats))
    }
}
