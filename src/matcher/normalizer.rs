// file: src/matcher/normalizer.rs
// description: Text normalization applied to queries and page text before scoring
// reference: Unicode case folding via str::to_lowercase

use crate::matcher::patterns::WHITESPACE_RUN;

pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Case-folds and collapses every whitespace run to a single space.
    pub fn normalize(&self, content: &str) -> String {
        let folded = content.trim().to_lowercase();
        WHITESPACE_RUN.replace_all(&folded, " ").into_owned()
    }

    /// Splits normalized text into alphanumeric tokens with their char offsets.
    pub fn tokens(&self, normalized: &str) -> Vec<(usize, String)> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut start = 0;

        for (offset, ch) in normalized.chars().enumerate() {
            if ch.is_alphanumeric() {
                if current.is_empty() {
                    start = offset;
                }
                current.push(ch);
            } else if !current.is_empty() {
                tokens.push((start, std::mem::take(&mut current)));
            }
        }

        if !current.is_empty() {
            tokens.push((start, current));
        }

        tokens
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_and_whitespace() {
        let normalizer = TextNormalizer::new();
        assert_eq!(
            normalizer.normalize("  Software\n\nTESTING\t 21CS401 "),
            "software testing 21cs401"
        );
    }

    #[test]
    fn test_normalize_empty() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("   \n "), "");
    }

    #[test]
    fn test_tokens_with_offsets() {
        let normalizer = TextNormalizer::new();
        let tokens = normalizer.tokens("unit-1: data structures");
        assert_eq!(
            tokens,
            vec![
                (0, "unit".to_string()),
                (5, "1".to_string()),
                (8, "data".to_string()),
                (13, "structures".to_string()),
            ]
        );
    }
}
