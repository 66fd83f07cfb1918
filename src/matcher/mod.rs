// file: src/matcher/mod.rs
// description: fuzzy subject matching module exports
// reference: internal module structure

pub mod fuzzy;
pub mod normalizer;
pub mod patterns;
pub mod similarity;

pub use fuzzy::FuzzyMatcher;
pub use normalizer::TextNormalizer;
