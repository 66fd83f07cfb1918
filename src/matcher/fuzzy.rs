// file: src/matcher/fuzzy.rs
// description: scores every indexed page against a subject query and selects pages
// reference: partial-ratio fuzzy matching with course-code boosting

use crate::config::{MAX_NEIGHBOR_HOPS, MatcherConfig};
use crate::error::Result;
use crate::matcher::normalizer::TextNormalizer;
use crate::matcher::patterns::course_code_regex;
use crate::matcher::similarity::{Similarity, partial_ratio, token_ratio};
use crate::models::{MatchResult, PageEntry, PageIndex, PageMatch};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::debug;

struct NormalizedQuery {
    text: String,
    tokens: Vec<String>,
    char_len: usize,
}

pub struct FuzzyMatcher {
    config: MatcherConfig,
    course_code: Regex,
    normalizer: TextNormalizer,
}

impl FuzzyMatcher {
    pub fn new(config: MatcherConfig) -> Result<Self> {
        let course_code = course_code_regex(&config.course_code_pattern)?;

        Ok(Self {
            config,
            course_code,
            normalizer: TextNormalizer::new(),
        })
    }

    pub fn find(&self, query: &str, index: &PageIndex) -> MatchResult {
        let query = self.normalize_query(query);
        if query.text.is_empty() || index.is_empty() {
            return MatchResult::empty(query.text);
        }

        let mut matches: Vec<PageMatch> = index
            .iter()
            .map(|entry| self.score_page(&query, entry))
            .filter(|m| m.score > self.config.threshold)
            .collect();

        matches.sort_by(by_score_then_page);

        debug!(
            "{} page(s) above threshold {} for \"{}\"",
            matches.len(),
            self.config.threshold,
            query.text
        );

        for m in &mut matches {
            m.course_code = index
                .get(m.page_number)
                .and_then(|entry| self.first_course_code(entry.normalized()));
        }

        let page_numbers = self.with_neighbors(&matches, index.total_pages());

        MatchResult {
            query: query.text,
            matches,
            page_numbers,
        }
    }

    fn normalize_query(&self, query: &str) -> NormalizedQuery {
        let text = self.normalizer.normalize(query);
        let tokens = self
            .normalizer
            .tokens(&text)
            .into_iter()
            .map(|(_, token)| token)
            .collect();
        let char_len = text.chars().count();

        NormalizedQuery {
            text,
            tokens,
            char_len,
        }
    }

    fn score_page(&self, query: &NormalizedQuery, entry: &PageEntry) -> PageMatch {
        let mut best = partial_ratio(&query.text, entry.normalized());

        if !best.verbatim {
            let tokens = token_ratio(&query.tokens, entry.tokens());
            let weighted = tokens.score * self.config.token_weight;
            if weighted > best.score {
                best = Similarity {
                    score: weighted,
                    ..tokens
                };
            }
        }

        let boosted = best.score >= self.config.boost_floor
            && self.has_code_near(entry.normalized(), best.offset, query.char_len);

        PageMatch {
            page_number: entry.page_number,
            score: if boosted {
                best.score + self.config.code_boost
            } else {
                best.score
            },
            base_score: best.score,
            boosted,
            verbatim: best.verbatim,
            course_code: None,
        }
    }

    fn first_course_code(&self, text: &str) -> Option<String> {
        self.course_code
            .find(text)
            .map(|code| code.as_str().to_uppercase())
    }

    fn has_code_near(&self, text: &str, offset: usize, match_len: usize) -> bool {
        let match_end = offset + match_len;

        self.course_code.find_iter(text).any(|code| {
            let code_start = text[..code.start()].chars().count();
            let code_end = code_start + code.as_str().chars().count();

            let gap = if code_end <= offset {
                offset - code_end
            } else if code_start >= match_end {
                code_start - match_end
            } else {
                0
            };

            gap <= self.config.code_proximity
        })
    }

    /// Neighbors of scored pages only; a neighbor never pulls in its own.
    fn with_neighbors(&self, matches: &[PageMatch], total_pages: u32) -> Vec<u32> {
        let hops = self.config.neighbor_hops.min(MAX_NEIGHBOR_HOPS);
        let mut pages = BTreeSet::new();

        for m in matches {
            pages.insert(m.page_number);

            for hop in 1..=hops {
                let before = m.page_number.checked_sub(hop).filter(|p| *p >= 1);
                let after = m.page_number.checked_add(hop).filter(|p| *p <= total_pages);
                pages.extend(before.into_iter().chain(after));
            }
        }

        pages.into_iter().collect()
    }
}

fn by_score_then_page(a: &PageMatch, b: &PageMatch) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then(a.page_number.cmp(&b.page_number))
}
