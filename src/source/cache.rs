// file: src/source/cache.rs
// description: fetch-once cache holding the syllabus bytes and their page index
// reference: https://docs.rs/tokio/latest/tokio/sync/struct.RwLock.html

use crate::error::{ExtractorError, Result};
use crate::index::{IndexStats, PageIndexer};
use crate::models::PageIndex;
use crate::source::fetcher::DocumentSource;
use crate::utils::telemetry::OperationTimer;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// The syllabus as fetched and indexed. Never mutated after construction.
#[derive(Debug)]
pub struct LoadedSyllabus {
    pub bytes: Vec<u8>,
    /// Hex SHA-256 of `bytes`
    pub digest: String,
    pub source: String,
    pub index: PageIndex,
    pub stats: IndexStats,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedSyllabus {
    pub fn short_digest(&self) -> &str {
        &self.digest[..12.min(self.digest.len())]
    }
}

pub struct DocumentCache {
    source: Arc<dyn DocumentSource>,
    indexer: Arc<PageIndexer>,
    slot: RwLock<Option<Arc<LoadedSyllabus>>>,
    // Serializes loads; readers of `slot` never wait on it.
    loading: Mutex<()>,
}

impl DocumentCache {
    pub fn new(source: Arc<dyn DocumentSource>, indexer: PageIndexer) -> Self {
        Self {
            source,
            indexer: Arc::new(indexer),
            slot: RwLock::new(None),
            loading: Mutex::new(()),
        }
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Returns the cached syllabus, fetching and indexing it on first use.
    /// Concurrent first callers queue on the load guard and share one fetch,
    /// while `peek`, `is_cached` and `invalidate` only touch the slot and
    /// never wait for a load. A failed load leaves the cache empty.
    pub async fn get(&self) -> Result<Arc<LoadedSyllabus>> {
        if let Some(loaded) = self.peek().await {
            debug!("Syllabus cache hit");
            return Ok(loaded);
        }

        let _guard = self.loading.lock().await;

        // Another caller may have finished loading while we queued.
        if let Some(loaded) = self.peek().await {
            debug!("Syllabus loaded by a concurrent caller");
            return Ok(loaded);
        }

        let loaded = Arc::new(self.load().await?);
        *self.slot.write().await = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    /// The cached value, without triggering a load.
    pub async fn peek(&self) -> Option<Arc<LoadedSyllabus>> {
        self.slot.read().await.clone()
    }

    pub async fn is_cached(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// Drops the cached syllabus; returns whether one was held.
    pub async fn invalidate(&self) -> bool {
        let dropped = self.slot.write().await.take().is_some();
        if dropped {
            info!("Syllabus cache invalidated");
        }
        dropped
    }

    async fn load(&self) -> Result<LoadedSyllabus> {
        let timer = OperationTimer::new("load syllabus");

        let bytes = self.source.fetch().await?;
        timer.checkpoint(&format!("fetched {} bytes", bytes.len()));

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = format!("{:x}", hasher.finalize());

        let indexer = Arc::clone(&self.indexer);
        let (bytes, index, stats) = tokio::task::spawn_blocking(move || {
            indexer
                .build(&bytes)
                .map(|(index, stats)| (bytes, index, stats))
        })
        .await
        .map_err(|e| ExtractorError::Parse(format!("Indexing task failed: {}", e)))??;

        timer.finish_with_count(index.len());

        Ok(LoadedSyllabus {
            bytes,
            digest,
            source: self.source.describe(),
            index,
            stats,
            loaded_at: Utc::now(),
        })
    }
}
