// file: src/pipeline/service.rs
// description: boundary operations tying cache, matcher, assembler and store together
// reference: search, download and health operations over the cached syllabus

use crate::config::Config;
use crate::error::{ExtractorError, Result};
use crate::exporter::{DownloadStore, PdfAssembler};
use crate::index::PageIndexer;
use crate::matcher::FuzzyMatcher;
use crate::models::PageMatch;
use crate::pdf::{LopdfBackend, PdfBackend};
use crate::source::{DocumentCache, DocumentSource, LoadedSyllabus, source_from_config};
use crate::utils::telemetry::{HealthCheck, HealthReport, OperationTimer};
use crate::utils::validation::Validator;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const SLOW_SEARCH: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub found: bool,
    pub subject: String,
    pub page_numbers: Vec<u32>,
    /// Present only when pages were found and assembled
    pub download_token: Option<String>,
    pub matches: Vec<PageMatch>,
}

impl SearchOutcome {
    fn not_found(subject: &str) -> Self {
        Self {
            found: false,
            subject: subject.to_string(),
            page_numbers: Vec::new(),
            download_token: None,
            matches: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    pub document_cached: bool,
    pub source: String,
    pub total_pages: Option<u32>,
    pub digest: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
}

pub struct SyllabusService {
    cache: DocumentCache,
    matcher: FuzzyMatcher,
    assembler: Arc<PdfAssembler>,
    store: DownloadStore,
}

impl SyllabusService {
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend: Arc<dyn PdfBackend> = Arc::new(LopdfBackend::new());
        let source = source_from_config(&config.source)?;
        let indexer = PageIndexer::new(Arc::clone(&backend), &config.matcher)?;

        Self::with_parts(source, backend, indexer, config)
    }

    pub fn with_parts(
        source: Arc<dyn DocumentSource>,
        backend: Arc<dyn PdfBackend>,
        indexer: PageIndexer,
        config: &Config,
    ) -> Result<Self> {
        Ok(Self {
            cache: DocumentCache::new(source, indexer),
            matcher: FuzzyMatcher::new(config.matcher.clone())?,
            assembler: Arc::new(PdfAssembler::new(backend)),
            store: DownloadStore::new(&config.storage),
        })
    }

    /// Fetches and indexes the syllabus if that has not happened yet.
    pub async fn load_syllabus(&self) -> Result<Arc<LoadedSyllabus>> {
        self.cache.get().await
    }

    /// Matches `subject` against the syllabus and, when anything matches,
    /// stores the assembled pages and returns their download token. No
    /// match is a normal outcome with `found == false`.
    pub async fn search(&self, subject: &str) -> Result<SearchOutcome> {
        Validator::validate_query(subject)?;
        let subject = subject.trim();

        let timer = OperationTimer::new(&format!(
            "search \"{}\"",
            Validator::truncate_text(subject, 40)
        ));
        let syllabus = self.cache.get().await?;

        let result = self.matcher.find(subject, &syllabus.index);
        if result.is_empty() {
            info!("No pages matched \"{}\"", subject);
            timer.finish();
            return Ok(SearchOutcome::not_found(subject));
        }

        debug!("{}", result.format_summary());
        timer.checkpoint(&format!("matched {} pages", result.page_numbers.len()));

        let assembler = Arc::clone(&self.assembler);
        let pages = result.page_numbers.clone();
        let document = Arc::clone(&syllabus);
        let pdf = tokio::task::spawn_blocking(move || assembler.assemble(&document.bytes, &pages))
            .await
            .map_err(|e| ExtractorError::Assembly(format!("Assembly task failed: {}", e)))??;

        let token = self.store.persist(subject, &pdf).await?;

        timer.warn_if_slow(SLOW_SEARCH);
        timer.finish();

        Ok(SearchOutcome {
            found: true,
            subject: subject.to_string(),
            page_numbers: result.page_numbers,
            download_token: Some(token),
            matches: result.matches,
        })
    }

    pub async fn fetch_download(&self, token: &str) -> Result<Vec<u8>> {
        self.store.fetch(token).await
    }

    pub async fn discard_download(&self, token: &str) -> Result<bool> {
        self.store.discard(token).await
    }

    /// Drops the cached syllabus so the next search fetches it again.
    pub async fn refresh(&self) -> bool {
        self.cache.invalidate().await
    }

    pub async fn health(&self) -> ServiceHealth {
        let loaded = self.cache.peek().await;

        ServiceHealth {
            document_cached: loaded.is_some(),
            source: self.cache.source_description(),
            total_pages: loaded.as_ref().map(|s| s.index.total_pages()),
            digest: loaded.as_ref().map(|s| s.digest.clone()),
            loaded_at: loaded.as_ref().map(|s| s.loaded_at),
        }
    }

    /// An unloaded cache is degraded rather than unhealthy; it loads on the
    /// first search.
    pub async fn health_report(&self) -> HealthReport {
        let start = Instant::now();
        let cache_check = match self.cache.peek().await {
            Some(syllabus) => HealthCheck::healthy(
                "document_cache",
                Some(format!(
                    "{} pages from {} (sha256 {})",
                    syllabus.index.total_pages(),
                    syllabus.source,
                    syllabus.short_digest()
                )),
                start.elapsed(),
            ),
            None => HealthCheck::degraded(
                "document_cache",
                format!("not loaded yet, source {}", self.cache.source_description()),
                start.elapsed(),
            ),
        };

        let start = Instant::now();
        let store_check = match self.store.ensure_dir().await {
            Ok(()) => HealthCheck::healthy(
                "download_store",
                Some(self.store.dir().display().to_string()),
                start.elapsed(),
            ),
            Err(e) => HealthCheck::unhealthy("download_store", e.to_string(), start.elapsed()),
        };

        HealthReport::new(vec![cache_check, store_check])
    }
}
