// file: src/matcher/patterns.rs
// description: compiled regex patterns for text normalization and course codes
// reference: https://docs.rs/regex

use crate::error::{ExtractorError, Result};
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

lazy_static! {
    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).expect("WHITESPACE_RUN regex is valid");

    // Anything that should not end up in a download file name
    pub static ref FILENAME_UNSAFE: Regex = Regex::new(
        r"[^\w\s-]"
    ).expect("FILENAME_UNSAFE regex is valid");
}

/// Compiles a configured course-code pattern, always case-insensitive.
pub fn course_code_regex(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ExtractorError::Config(format!("invalid course_code_pattern: {}", e)))
}
