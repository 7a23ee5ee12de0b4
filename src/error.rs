use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhoneSiftError {
    #[error("Unsupported file type: {path} ({reason})")]
    UnsupportedFileType { path: String, reason: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size} bytes)")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Export format '{format}' is not available in this build")]
    ExportUnavailable { format: String },

    #[error("Export failed: {message}")]
    Export { message: String },

    #[error("Invalid command '{input}': {reason}")]
    InvalidCommand { input: String, reason: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for PhoneSiftError {
    fn user_message(&self) -> String {
        match self {
            PhoneSiftError::UnsupportedFileType { path, reason } => {
                format!("Cannot read {}: {}", path, reason)
            }
            PhoneSiftError::FileNotFound { path } => {
                format!("File not found: {}", path)
            }
            PhoneSiftError::FileTooLarge { size, max_size } => {
                format!(
                    "File too large: {} (maximum allowed: {})",
                    format_bytes(*size),
                    format_bytes(*max_size)
                )
            }
            PhoneSiftError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            PhoneSiftError::ExportUnavailable { format } => {
                format!("The {} export library is not available", format)
            }
            PhoneSiftError::Export { message } => {
                format!("Could not write the document: {}", message)
            }
            PhoneSiftError::InvalidCommand { input, reason } => {
                format!("{}: {}", input, reason)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            PhoneSiftError::UnsupportedFileType { .. } => Some(
                "PDF and other binary files are not parsed. Please provide a plain .txt file.".to_string()
            ),
            PhoneSiftError::FileNotFound { .. } => Some(
                "Check the path and try loading the file again.".to_string()
            ),
            PhoneSiftError::FileTooLarge { .. } => Some(
                "Increase input.max_file_size in the configuration file or split the text file.".to_string()
            ),
            PhoneSiftError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all values are in range.".to_string()
            ),
            PhoneSiftError::ExportUnavailable { .. } => Some(
                "Rebuild with the `pdf` feature enabled, or export with --export-format text.".to_string()
            ),
            PhoneSiftError::Export { .. } => Some(
                "Ensure the output directory exists and is writable.".to_string()
            ),
            PhoneSiftError::InvalidCommand { .. } => Some(
                "Type `help` to see the available commands.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for PhoneSiftError {
    fn from(error: toml::de::Error) -> Self {
        PhoneSiftError::Config {
            message: error.to_string(),
        }
    }
}

#[cfg(feature = "pdf")]
impl From<lopdf::Error> for PhoneSiftError {
    fn from(error: lopdf::Error) -> Self {
        PhoneSiftError::Export {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PhoneSiftError>;

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = PhoneSiftError::UnsupportedFileType {
            path: "scan.pdf".to_string(),
            reason: "PDF documents are not supported".to_string(),
        };
        assert!(error.user_message().contains("scan.pdf"));
        assert!(error.suggestion().unwrap().contains(".txt"));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(500), "500 B");
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let error = PhoneSiftError::from(toml_error);
        assert!(matches!(error, PhoneSiftError::Config { .. }));
    }

    #[test]
    fn test_cancelled_has_no_suggestion() {
        assert!(PhoneSiftError::Cancelled.suggestion().is_none());
        assert_eq!(
            PhoneSiftError::Cancelled.user_message(),
            "Operation was cancelled by user"
        );
    }
}
