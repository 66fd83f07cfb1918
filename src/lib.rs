// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod index;
pub mod matcher;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod source;
pub mod utils;

pub use config::{Config, MatcherConfig, SourceConfig, StorageConfig};
pub use error::{ExtractorError, Result};
pub use exporter::{DownloadStore, PdfAssembler};
pub use index::{IndexStats, PageIndexer};
pub use matcher::FuzzyMatcher;
pub use models::{MatchResult, PageEntry, PageIndex, PageMatch};
pub use pdf::{LopdfBackend, PdfBackend, PdfDocument};
pub use pipeline::{SearchOutcome, ServiceHealth, SyllabusService};
pub use source::{DocumentCache, DocumentSource, LoadedSyllabus, source_from_config};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        assert!(FuzzyMatcher::new(config.matcher.clone()).is_ok());
        assert!(SyllabusService::from_config(&config).is_ok());
    }
}
