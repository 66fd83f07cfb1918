// file: src/models/match_result.rs
// description: Match result model with per-page relevance scores
// reference: Produced by the fuzzy matcher, consumed by the pdf assembler

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMatch {
    /// 1-indexed page number
    pub page_number: u32,

    /// Final score after boosting (may exceed 100)
    pub score: f64,

    /// Similarity before boosting, 0-100
    pub base_score: f64,

    /// Whether the course-code boost was applied
    pub boosted: bool,

    /// Whether the query occurs verbatim on the page
    pub verbatim: bool,

    /// First course code found on the page, if any
    pub course_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchResult {
    /// Normalized query the result was computed for
    pub query: String,

    /// Scored pages above the threshold, best first
    pub matches: Vec<PageMatch>,

    /// Scored pages plus neighbors, ascending and unique
    pub page_numbers: Vec<u32>,
}

impl MatchResult {
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            matches: Vec::new(),
            page_numbers: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.page_numbers.is_empty()
    }

    pub fn best(&self) -> Option<&PageMatch> {
        self.matches.first()
    }

    /// Pages included only for continuity, without a score of their own.
    pub fn neighbor_pages(&self) -> Vec<u32> {
        self.page_numbers
            .iter()
            .copied()
            .filter(|p| !self.matches.iter().any(|m| m.page_number == *p))
            .collect()
    }

    pub fn format_summary(&self) -> String {
        let mut output = format!(
            "Query: \"{}\" | {} scored page(s), {} total\n",
            self.query,
            self.matches.len(),
            self.page_numbers.len()
        );

        for m in &self.matches {
            output.push_str(&format!(
                "  page {:>4}  score {:>6.2}  base {:>6.2}{}{}\n",
                m.page_number,
                m.score,
                m.base_score,
                if m.boosted { "  +code" } else { "" },
                m.course_code
                    .as_ref()
                    .map(|c| format!("  [{}]", c))
                    .unwrap_or_default()
            ));
        }

        let neighbors = self.neighbor_pages();
        if !neighbors.is_empty() {
            output.push_str(&format!("  neighbors: {:?}\n", neighbors));
        }

        output
    }
}
