use crate::config::InputConfig;
use crate::error::{PhoneSiftError, Result};
use crate::scanner::{FileFilter, FileVerdict};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct LoadedText {
    pub path: PathBuf,
    pub content: String,
    pub bytes: u64,
    /// Set when invalid UTF-8 sequences were replaced during decoding.
    pub lossy: bool,
}

/// Reads a whole text file, refusing PDF and binary input before any
/// content reaches the scanner.
pub struct TextLoader {
    filter: FileFilter,
}

impl TextLoader {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
        }
    }

    pub async fn load(&self, path: &Path) -> Result<LoadedText> {
        let shown = path.display().to_string();

        if let FileVerdict::Rejected { reason } = self.filter.check_path(path) {
            return Err(PhoneSiftError::UnsupportedFileType {
                path: shown,
                reason,
            });
        }

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| Self::map_io_error(e, &shown))?;

        if !metadata.is_file() {
            return Err(PhoneSiftError::UnsupportedFileType {
                path: shown,
                reason: "not a regular file".to_string(),
            });
        }

        if !self.filter.is_size_allowed(metadata.len()) {
            return Err(PhoneSiftError::FileTooLarge {
                size: metadata.len(),
                max_size: self.filter.get_max_file_size(),
            });
        }

        let raw = tokio::fs::read(path)
            .await
            .map_err(|e| Self::map_io_error(e, &shown))?;

        if let FileVerdict::Rejected { reason } = self.filter.check_header(&raw) {
            return Err(PhoneSiftError::UnsupportedFileType {
                path: shown,
                reason,
            });
        }

        let bytes = raw.len() as u64;
        let (content, lossy) = match String::from_utf8(raw) {
            Ok(content) => (content, false),
            Err(e) => {
                tracing::warn!(path = %shown, "input is not valid UTF-8, decoding lossily");
                (String::from_utf8_lossy(e.as_bytes()).into_owned(), true)
            }
        };

        tracing::info!(path = %shown, bytes, "loaded text file");

        Ok(LoadedText {
            path: path.to_path_buf(),
            content,
            bytes,
            lossy,
        })
    }

    fn map_io_error(error: std::io::Error, path: &str) -> PhoneSiftError {
        match error.kind() {
            ErrorKind::NotFound => PhoneSiftError::FileNotFound {
                path: path.to_string(),
            },
            _ => PhoneSiftError::Io(error),
        }
    }
}

impl Default for TextLoader {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_loads_plain_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.txt");
        fs::write(&path, "Call 123-456-7890").unwrap();

        let loaded = TextLoader::default().load(&path).await.unwrap();

        assert_eq!(loaded.content, "Call 123-456-7890");
        assert_eq!(loaded.bytes, 17);
        assert!(!loaded.lossy);
    }

    #[tokio::test]
    async fn test_rejects_pdf_extension_without_reading() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scan.pdf");

        // The file does not exist: rejection happens on the name alone.
        let result = TextLoader::default().load(&path).await;
        assert!(matches!(
            result,
            Err(PhoneSiftError::UnsupportedFileType { .. })
        ));
    }

    #[tokio::test]
    async fn test_rejects_pdf_content_with_text_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("renamed.txt");
        fs::write(&path, b"%PDF-1.4\n1 0 obj\n").unwrap();

        let result = TextLoader::default().load(&path).await;
        assert!(matches!(
            result,
            Err(PhoneSiftError::UnsupportedFileType { .. })
        ));
    }

    #[tokio::test]
    async fn test_rejects_binary_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blob.dat");
        fs::write(&path, [0x7f, b'E', b'L', b'F', 0, 0, 1]).unwrap();

        let result = TextLoader::default().load(&path).await;
        assert!(matches!(
            result,
            Err(PhoneSiftError::UnsupportedFileType { .. })
        ));
    }

    #[tokio::test]
    async fn test_errors_name_the_requested_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("renamed.txt");
        fs::write(&path, b"%PDF-1.7").unwrap();

        match TextLoader::default().load(&path).await {
            Err(PhoneSiftError::UnsupportedFileType { path: reported, .. }) => {
                assert_eq!(reported, path.display().to_string());
            }
            other => panic!("expected rejection, got {:?}", other.map(|l| l.path)),
        }

        let missing = temp_dir.path().join("gone.txt");
        match TextLoader::default().load(&missing).await {
            Err(PhoneSiftError::FileNotFound { path: reported }) => {
                assert_eq!(reported, missing.display().to_string());
            }
            other => panic!("expected not found, got {:?}", other.map(|l| l.path)),
        }
    }

    #[tokio::test]
    async fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let result = TextLoader::default().load(&path).await;
        assert!(matches!(result, Err(PhoneSiftError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_directory_is_not_a_text_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = TextLoader::default().load(temp_dir.path()).await;
        assert!(matches!(
            result,
            Err(PhoneSiftError::UnsupportedFileType { .. })
        ));
    }

    #[tokio::test]
    async fn test_size_limit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("big.txt");
        fs::write(&path, "x".repeat(64)).unwrap();

        let config = InputConfig {
            max_file_size: 32,
            ..InputConfig::default()
        };
        let result = TextLoader::new(&config).load(&path).await;
        assert!(matches!(
            result,
            Err(PhoneSiftError::FileTooLarge { size: 64, max_size: 32 })
        ));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decoded_lossily() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xe9 555-123-4567").unwrap();

        let loaded = TextLoader::default().load(&path).await.unwrap();
        assert!(loaded.lossy);
        assert!(loaded.content.ends_with("555-123-4567"));
    }
}
