// file: src/source/fetcher.rs
// description: retrieval of the raw syllabus pdf from a url or a local copy
// reference: https://docs.rs/reqwest

use crate::config::SourceConfig;
use crate::error::{ExtractorError, Result};
use crate::utils::validation::Validator;
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Somewhere the syllabus bytes can be read from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Human-readable origin used in logs and health output.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<u8>>;
}

pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Validator::validate_url(&config.url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ExtractorError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config.url.clone()))
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        info!("Downloading syllabus from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(ExtractorError::Fetch(format!(
                "{} responded with status {}",
                self.url,
                response.status()
            )));
        }

        let bytes = response.bytes().await?;

        // Portals serve HTML error pages with a 200 often enough
        Validator::validate_pdf_bytes(&bytes)
            .map_err(|e| ExtractorError::Fetch(format!("{}: {}", self.url, e)))?;

        debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }
}

#[async_trait]
impl DocumentSource for LocalFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        info!("Reading syllabus from {}", self.path.display());

        tokio::fs::read(&self.path)
            .await
            .map_err(|source| ExtractorError::FileOperation {
                path: self.path.clone(),
                source,
            })
    }
}

/// Uses the local copy when it is present and downloads otherwise.
pub struct LayeredSource {
    local: LocalFileSource,
    remote: HttpSource,
}

impl LayeredSource {
    pub fn new(local: LocalFileSource, remote: HttpSource) -> Self {
        Self { local, remote }
    }
}

#[async_trait]
impl DocumentSource for LayeredSource {
    fn describe(&self) -> String {
        format!("{} (fallback {})", self.local.describe(), self.remote.describe())
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        if self.local.exists().await {
            self.local.fetch().await
        } else {
            debug!("No local copy at {}", self.local.describe());
            self.remote.fetch().await
        }
    }
}

pub fn source_from_config(config: &SourceConfig) -> Result<Arc<dyn DocumentSource>> {
    let remote = HttpSource::new(config)?;

    match &config.local_path {
        Some(path) => Ok(Arc::new(LayeredSource::new(
            LocalFileSource::new(path.clone()),
            remote,
        ))),
        None => Ok(Arc::new(remote)),
    }
}
