// file: src/models/page.rs
// description: per-page text index built from the syllabus document
// reference: internal data structures

use crate::matcher::normalizer::TextNormalizer;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PageEntry {
    /// 1-indexed page number in the source document
    pub page_number: u32,

    /// Raw extracted text, empty when extraction failed
    pub text: String,

    #[serde(skip)]
    normalized: String,

    #[serde(skip)]
    tokens: Vec<(usize, String)>,
}

impl PageEntry {
    pub fn new(page_number: u32, text: String) -> Self {
        let normalizer = TextNormalizer::new();
        let normalized = normalizer.normalize(&text);
        let tokens = normalizer.tokens(&normalized);

        Self {
            page_number,
            text,
            normalized,
            tokens,
        }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn tokens(&self) -> &[(usize, String)] {
        &self.tokens
    }

    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Ordered page texts; entry `i` always holds page `i + 1`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageIndex {
    pages: Vec<PageEntry>,
}

impl PageIndex {
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageEntry::new(i as u32 + 1, text.into()))
            .collect();

        Self { pages }
    }

    pub fn total_pages(&self) -> u32 {
        self.pages.len() as u32
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, page_number: u32) -> Option<&PageEntry> {
        if page_number == 0 {
            return None;
        }
        self.pages.get(page_number as usize - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageEntry> {
        self.pages.iter()
    }

    pub fn blank_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.is_blank()).count()
    }
}
