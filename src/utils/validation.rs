// file: src/utils/validation.rs
// description: input validation and sanitization helpers
// reference: input validation patterns

use crate::error::{ExtractorError, Result};
use crate::matcher::patterns::{FILENAME_UNSAFE, WHITESPACE_RUN};
use std::fs;
use std::path::Path;

/// Longest subject fragment embedded in a download file name.
const MAX_SUBJECT_SLUG_CHARS: usize = 20;

pub struct Validator;

impl Validator {
    pub fn validate_query(query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(ExtractorError::Validation(
                "Please enter a subject name".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ExtractorError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_pdf_bytes(bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Err(ExtractorError::Validation("PDF content is empty".to_string()));
        }

        if !bytes.starts_with(b"%PDF-") {
            return Err(ExtractorError::Validation(
                "Content does not start with a PDF header".to_string(),
            ));
        }

        Ok(())
    }

    /// Download tokens are bare file names: `{prefix}_{slug}_{uuid}.pdf`.
    pub fn validate_download_token(token: &str, prefix: &str) -> Result<()> {
        let well_formed = !token.is_empty()
            && !token.contains("..")
            && !token.contains('/')
            && !token.contains('\\')
            && token.starts_with(&format!("{}_", prefix))
            && token.ends_with(".pdf")
            && token
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !well_formed {
            return Err(ExtractorError::Validation(format!(
                "Malformed download token: {}",
                token
            )));
        }

        Ok(())
    }

    /// Turns a free-text subject into a short file-name fragment.
    pub fn sanitize_subject(subject: &str) -> String {
        let cleaned = FILENAME_UNSAFE.replace_all(subject.trim(), "");
        let underscored = WHITESPACE_RUN.replace_all(&cleaned, "_");
        underscored.chars().take(MAX_SUBJECT_SLUG_CHARS).collect()
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let head: String = text.chars().take(max_chars).collect();
            format!("{}...", head)
        }
    }

    pub fn validate_within_base_dir(path: &Path, base_dir: &Path) -> Result<()> {
        let canonical_path = fs::canonicalize(path).map_err(|e| {
            ExtractorError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        let canonical_base = fs::canonicalize(base_dir).map_err(|e| {
            ExtractorError::Validation(format!(
                "Cannot canonicalize base dir {}: {}",
                base_dir.display(),
                e
            ))
        })?;

        if !canonical_path.starts_with(&canonical_base) {
            return Err(ExtractorError::Validation(format!(
                "Path traversal detected ({} outside {})",
                canonical_path.display(),
                canonical_base.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_query() {
        assert!(Validator::validate_query("Software Testing").is_ok());
        assert!(Validator::validate_query("").is_err());
        assert!(Validator::validate_query("   ").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://example.com").is_ok());
        assert!(Validator::validate_url("example.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_pdf_bytes() {
        assert!(Validator::validate_pdf_bytes(b"%PDF-1.5\n...").is_ok());
        assert!(Validator::validate_pdf_bytes(b"").is_err());
        assert!(Validator::validate_pdf_bytes(b"<html>").is_err());
    }

    #[test]
    fn test_validate_download_token() {
        let token = "srmist_Software_Testing_3f1c9a8e-1d2b-4c3d-9e8f-0a1b2c3d4e5f.pdf";
        assert!(Validator::validate_download_token(token, "srmist").is_ok());
        assert!(Validator::validate_download_token("../etc/passwd", "srmist").is_err());
        assert!(Validator::validate_download_token("srmist_a/../../b.pdf", "srmist").is_err());
        assert!(Validator::validate_download_token("other_a.pdf", "srmist").is_err());
        assert!(Validator::validate_download_token("srmist_a.txt", "srmist").is_err());
        assert!(Validator::validate_download_token("", "srmist").is_err());
    }

    #[test]
    fn test_sanitize_subject() {
        assert_eq!(
            Validator::sanitize_subject("Data Structures & Algorithms"),
            "Data_Structures_Algo"
        );
        assert_eq!(Validator::sanitize_subject("  C++ (Lab)  "), "C_Lab");
        assert_eq!(Validator::sanitize_subject("!!!"), "");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
    }

    #[test]
    fn test_validate_within_base_dir() {
        let base = TempDir::new().unwrap();
        let file_path = base.path().join("nested.pdf");
        std::fs::write(&file_path, "%PDF-").unwrap();

        assert!(Validator::validate_within_base_dir(&file_path, base.path()).is_ok());

        let outside = TempDir::new().unwrap();
        let outside_file = outside.path().join("other.pdf");
        std::fs::write(&outside_file, "%PDF-").unwrap();

        assert!(Validator::validate_within_base_dir(&outside_file, base.path()).is_err());
    }
}
