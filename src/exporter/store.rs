// file: src/exporter/store.rs
// description: persists assembled pdfs under unique download tokens
// reference: https://docs.rs/tokio/latest/tokio/fs/index.html

use crate::config::StorageConfig;
use crate::error::{ExtractorError, Result};
use crate::utils::validation::Validator;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// A token is the bare file name `{prefix}_{subject slug}_{uuid}.pdf`
/// inside the storage directory.
pub struct DownloadStore {
    dir: PathBuf,
    prefix: String,
}

impl DownloadStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            dir: config.resolved_dir(),
            prefix: config.file_prefix.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ExtractorError::FileOperation {
                path: self.dir.clone(),
                source,
            })
    }

    pub async fn persist(&self, subject: &str, bytes: &[u8]) -> Result<String> {
        self.ensure_dir().await?;

        let token = format!(
            "{}_{}_{}.pdf",
            self.prefix,
            Validator::sanitize_subject(subject),
            Uuid::new_v4()
        );
        let path = self.dir.join(&token);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| ExtractorError::FileOperation {
                path: path.clone(),
                source,
            })?;

        info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(token)
    }

    pub async fn fetch(&self, token: &str) -> Result<Vec<u8>> {
        let path = self.resolve(token)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ExtractorError::NotFound(token.to_string()))
            }
            Err(source) => Err(ExtractorError::FileOperation { path, source }),
        }
    }

    /// Returns whether a file was removed. A token that was already removed
    /// is not an error.
    pub async fn discard(&self, token: &str) -> Result<bool> {
        self.check_token(token)?;

        let path = self.dir.join(token);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            debug!("Nothing to discard for {}", token);
            return Ok(false);
        }

        let path = self.resolve(token)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Discarded {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(ExtractorError::FileOperation { path, source }),
        }
    }

    fn check_token(&self, token: &str) -> Result<()> {
        Validator::validate_download_token(token, &self.prefix)
            .map_err(|_| ExtractorError::NotFound(token.to_string()))
    }

    /// Well-formed tokens only, and only files that resolve inside the
    /// storage directory.
    fn resolve(&self, token: &str) -> Result<PathBuf> {
        self.check_token(token)?;

        let path = self.dir.join(token);
        Validator::validate_within_base_dir(&path, &self.dir)
            .map_err(|_| ExtractorError::NotFound(token.to_string()))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> DownloadStore {
        DownloadStore::new(&StorageConfig {
            temp_dir: Some(dir.path().to_path_buf()),
            file_prefix: "srmist".to_string(),
        })
    }

    #[tokio::test]
    async fn test_persist_then_fetch() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let token = store.persist("Software Testing", b"%PDF-1.5 pages").await.unwrap();

        assert!(token.starts_with("srmist_Software_Testing_"));
        assert!(token.ends_with(".pdf"));
        assert_eq!(store.fetch(&token).await.unwrap(), b"%PDF-1.5 pages".to_vec());
    }

    #[tokio::test]
    async fn test_tokens_are_unique_per_persist() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let a = store.persist("Compiler Design", b"%PDF-a").await.unwrap();
        let b = store.persist("Compiler Design", b"%PDF-b").await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.fetch(&a).await.unwrap(), b"%PDF-a".to_vec());
        assert_eq!(store.fetch(&b).await.unwrap(), b"%PDF-b".to_vec());
    }

    #[tokio::test]
    async fn test_persist_creates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let store = DownloadStore::new(&StorageConfig {
            temp_dir: Some(dir.path().join("nested").join("downloads")),
            file_prefix: "srmist".to_string(),
        });

        let token = store.persist("Networks", b"%PDF-").await.unwrap();
        assert!(store.dir().join(&token).exists());
    }

    #[tokio::test]
    async fn test_fetch_unknown_or_malformed_token_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for token in [
            "srmist_Missing_00000000-0000-0000-0000-000000000000.pdf",
            "../../etc/passwd",
            "other_Subject_x.pdf",
            "srmist_x.exe",
        ] {
            assert!(
                matches!(store.fetch(token).await, Err(ExtractorError::NotFound(_))),
                "{}",
                token
            );
        }
    }

    #[tokio::test]
    async fn test_discard_removes_file_once() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let token = store.persist("Data Mining", b"%PDF-").await.unwrap();

        assert!(store.discard(&token).await.unwrap());
        assert!(!store.discard(&token).await.unwrap());
        assert!(matches!(
            store.fetch(&token).await,
            Err(ExtractorError::NotFound(_))
        ));
        assert!(store.discard("../escape.pdf").await.is_err());
    }
}
