// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ExtractorError, Result};
use crate::matcher::patterns::course_code_regex;
use crate::utils::validation::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SYLLABUS_URL: &str =
    "https://webstor.srmist.edu.in/web_assets/downloads/2023/computing-programmes-syllabus-2021.pdf";

pub const DEFAULT_COURSE_CODE_PATTERN: &str = r"(?i)\b\d{2}[a-z]{2,3}\d{3}[a-z]?\b";

/// Upper bound for `neighbor_hops`; subjects span two or three pages.
pub const MAX_NEIGHBOR_HOPS: u32 = 3;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub source: SourceConfig,
    pub matcher: MatcherConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    pub url: String,
    /// Local copy consulted before downloading.
    #[serde(default)]
    pub local_path: Option<PathBuf>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Scoring constants for the fuzzy matcher. Scores are on a 0-100 scale
/// before boosting.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatcherConfig {
    /// Pages must score strictly above this to be kept.
    pub threshold: f64,
    /// Added when a course code sits near the best match.
    pub code_boost: f64,
    /// Base score required before the course-code boost applies.
    pub boost_floor: f64,
    /// Maximum distance in characters between the match and a course code.
    pub code_proximity: usize,
    pub course_code_pattern: String,
    /// Multiplier for the word-order tolerant token score.
    pub token_weight: f64,
    /// Pages added on each side of every scored page, at most `MAX_NEIGHBOR_HOPS`.
    pub neighbor_hops: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Falls back to the system temp directory.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: 60.0,
            code_boost: 15.0,
            boost_floor: 50.0,
            code_proximity: 160,
            course_code_pattern: DEFAULT_COURSE_CODE_PATTERN.to_string(),
            token_weight: 0.9,
            neighbor_hops: 1,
        }
    }
}

impl StorageConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SYLLABUS_EXTRACTOR")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ExtractorError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ExtractorError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            source: SourceConfig {
                url: DEFAULT_SYLLABUS_URL.to_string(),
                local_path: Some(PathBuf::from(
                    "data/computing-programmes-syllabus-2021.pdf",
                )),
                timeout_secs: 30,
                user_agent: format!("syllabus_extractor/{}", env!("CARGO_PKG_VERSION")),
            },
            matcher: MatcherConfig::default(),
            storage: StorageConfig {
                temp_dir: None,
                file_prefix: "srmist".to_string(),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.source.url)
            .map_err(|e| ExtractorError::Config(e.to_string()))?;

        if self.source.timeout_secs == 0 {
            return Err(ExtractorError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=100.0).contains(&self.matcher.threshold) {
            return Err(ExtractorError::Config(format!(
                "threshold must be within 0-100, got {}",
                self.matcher.threshold
            )));
        }

        if self.matcher.code_boost < 0.0 || self.matcher.token_weight < 0.0 {
            return Err(ExtractorError::Config(
                "code_boost and token_weight must not be negative".to_string(),
            ));
        }

        if self.matcher.neighbor_hops > MAX_NEIGHBOR_HOPS {
            return Err(ExtractorError::Config(format!(
                "neighbor_hops must be at most {}, got {}",
                MAX_NEIGHBOR_HOPS, self.matcher.neighbor_hops
            )));
        }

        course_code_regex(&self.matcher.course_code_pattern)?;

        if self.storage.file_prefix.is_empty()
            || !self
                .storage
                .file_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ExtractorError::Config(format!(
                "file_prefix must be non-empty and alphanumeric: {:?}",
                self.storage.file_prefix
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default_config();
        config.matcher.threshold = 120.0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.matcher.neighbor_hops = MAX_NEIGHBOR_HOPS + 1;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.matcher.course_code_pattern = "(unclosed".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.source.url = "ftp://example.com/syllabus.pdf".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.storage.file_prefix = "../x".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            r#"
[source]
url = "https://example.com/syllabus.pdf"
timeout_secs = 5
user_agent = "test"

[matcher]
threshold = 70.0
code_boost = 10.0
boost_floor = 40.0
code_proximity = 100
course_code_pattern = '\d{2}[A-Z]{3}\d{3}'
token_weight = 0.8
neighbor_hops = 2

[storage]
temp_dir = "/tmp/syllabus"
file_prefix = "test"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.source.url, "https://example.com/syllabus.pdf");
        assert!(config.source.local_path.is_none());
        assert_eq!(config.matcher.threshold, 70.0);
        assert_eq!(config.matcher.neighbor_hops, 2);
        assert_eq!(
            config.storage.resolved_dir(),
            PathBuf::from("/tmp/syllabus")
        );
    }
}
