// file: src/matcher/similarity.rs
// description: partial-ratio and token similarity on normalized text, 0-100 scale
// reference: https://docs.rs/strsim

use strsim::normalized_levenshtein;

/// Best similarity found in a text and the char offset where it was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    pub score: f64,
    pub offset: usize,
    pub verbatim: bool,
}

impl Similarity {
    pub fn none() -> Self {
        Self {
            score: 0.0,
            offset: 0,
            verbatim: false,
        }
    }
}

/// Similarity of `query` against its best-matching window in `text`.
///
/// A verbatim occurrence scores 100. Otherwise every query-length window
/// that starts on a word boundary is compared with normalized Levenshtein
/// and the best window wins; earlier windows win ties.
pub fn partial_ratio(query: &str, text: &str) -> Similarity {
    if query.is_empty() || text.is_empty() {
        return Similarity::none();
    }

    if let Some(byte_pos) = text.find(query) {
        return Similarity {
            score: 100.0,
            offset: text[..byte_pos].chars().count(),
            verbatim: true,
        };
    }

    let text_chars: Vec<char> = text.chars().collect();
    let window_len = query.chars().count();

    if text_chars.len() <= window_len {
        return Similarity {
            score: normalized_levenshtein(query, text) * 100.0,
            offset: 0,
            verbatim: false,
        };
    }

    let mut best = Similarity::none();
    let mut window = String::with_capacity(query.len());

    for start in 0..=(text_chars.len() - window_len) {
        let at_word_start = start == 0 || !text_chars[start - 1].is_alphanumeric();
        if !at_word_start || !text_chars[start].is_alphanumeric() {
            continue;
        }

        window.clear();
        window.extend(&text_chars[start..start + window_len]);

        let score = normalized_levenshtein(query, &window) * 100.0;
        if score > best.score {
            best = Similarity {
                score,
                offset: start,
                verbatim: false,
            };
        }
    }

    best
}

/// Word-order tolerant score: every query token is matched against its
/// closest page token and the weakest of those matches is the score, so all
/// query words have to be present in some spelling. The offset is that of
/// the strongest token hit.
pub fn token_ratio(query_tokens: &[String], page_tokens: &[(usize, String)]) -> Similarity {
    if query_tokens.is_empty() || page_tokens.is_empty() {
        return Similarity::none();
    }

    let mut weakest = 1.0_f64;
    let mut strongest = Similarity::none();

    for query_token in query_tokens {
        let mut token_best = 0.0;
        let mut token_offset = 0;

        for (offset, page_token) in page_tokens {
            let score = normalized_levenshtein(query_token, page_token);
            if score > token_best {
                token_best = score;
                token_offset = *offset;
                if score >= 1.0 {
                    break;
                }
            }
        }

        weakest = weakest.min(token_best);
        if token_best * 100.0 > strongest.score {
            strongest = Similarity {
                score: token_best * 100.0,
                offset: token_offset,
                verbatim: false,
            };
        }
    }

    Similarity {
        score: weakest * 100.0,
        offset: strongest.offset,
        verbatim: false,
    }
}
