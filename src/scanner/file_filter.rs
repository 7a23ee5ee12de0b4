use crate::config::InputConfig;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Decision about whether an input file may be fed to the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileVerdict {
    Accepted,
    Rejected { reason: String },
}

impl FileVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, FileVerdict::Accepted)
    }
}

pub struct FileFilter {
    rejected_extensions: Vec<String>,
    max_file_size: u64,
    sniff_bytes: usize,
}

impl FileFilter {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            rejected_extensions: config
                .rejected_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            max_file_size: config.max_file_size,
            sniff_bytes: config.sniff_bytes,
        }
    }

    /// Checks the file name before anything is read.
    pub fn check_path(&self, path: &Path) -> FileVerdict {
        if let Some(extension) = path.extension().and_then(|s| s.to_str()) {
            let ext_lower = extension.to_lowercase();
            if self.rejected_extensions.contains(&ext_lower) {
                let reason = if ext_lower == "pdf" {
                    "PDF file parsing is not supported".to_string()
                } else {
                    format!(".{} files are not plain text", ext_lower)
                };
                return FileVerdict::Rejected { reason };
            }
        }

        FileVerdict::Accepted
    }

    /// Inspects the leading bytes of the content for PDF or binary data.
    pub fn check_header(&self, content: &[u8]) -> FileVerdict {
        let head = &content[..content.len().min(self.sniff_bytes)];

        if head.starts_with(PDF_MAGIC) {
            return FileVerdict::Rejected {
                reason: "PDF file parsing is not supported".to_string(),
            };
        }

        if head.contains(&0) {
            return FileVerdict::Rejected {
                reason: "file contains binary data".to_string(),
            };
        }

        FileVerdict::Accepted
    }

    pub fn is_size_allowed(&self, size: u64) -> bool {
        size <= self.max_file_size
    }

    pub fn get_max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn get_rejected_extensions(&self) -> &[String] {
        &self.rejected_extensions
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        let config = InputConfig::default();
        Self::new(&config)
    }
}
