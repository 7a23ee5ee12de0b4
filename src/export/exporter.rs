use crate::config::{ExportConfig, LayoutConfig};
use crate::error::{PhoneSiftError, Result};
use crate::export::{ExportFormat, ExportList, ListDocument, ListKind};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub kind: ListKind,
    pub format: ExportFormat,
    pub path: PathBuf,
    pub entries: usize,
    pub pages: usize,
    pub bytes: u64,
}

#[derive(Debug, Clone)]
pub struct Exporter {
    output_directory: PathBuf,
    format: ExportFormat,
    layout: LayoutConfig,
}

impl Exporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            output_directory: config.output_directory.clone(),
            format: config.format,
            layout: config.layout.clone(),
        }
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output_directory<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_directory = dir.into();
        self
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn target_path(&self, kind: ListKind) -> PathBuf {
        self.output_directory.join(kind.file_name(self.format))
    }

    /// Renders the list completely in memory, then writes it in one step so a
    /// failed render never leaves a partial file behind.
    pub fn export(&self, list: &ExportList) -> Result<ExportReport> {
        if !self.format.is_available() {
            return Err(PhoneSiftError::ExportUnavailable {
                format: self.format.to_string(),
            });
        }

        let document = ListDocument::layout(list, &self.layout);
        let bytes = self.render(&document)?;

        if !self.output_directory.exists() {
            fs::create_dir_all(&self.output_directory).map_err(|e| PhoneSiftError::Export {
                message: format!(
                    "Failed to create {}: {}",
                    self.output_directory.display(),
                    e
                ),
            })?;
        }

        let path = self.target_path(list.kind);
        fs::write(&path, &bytes).map_err(|e| PhoneSiftError::Export {
            message: format!("Failed to write {}: {}", path.display(), e),
        })?;

        tracing::info!(
            kind = %list.kind,
            format = %self.format,
            path = %path.display(),
            pages = document.page_count(),
            "exported {} entries",
            list.len()
        );

        Ok(ExportReport {
            kind: list.kind,
            format: self.format,
            path,
            entries: list.len(),
            pages: document.page_count(),
            bytes: bytes.len() as u64,
        })
    }

    fn render(&self, document: &ListDocument) -> Result<Vec<u8>> {
        match self.format {
            ExportFormat::Text => Ok(document.render_text().into_bytes()),
            #[cfg(feature = "pdf")]
            ExportFormat::Pdf => crate::export::pdf_writer::render_pdf(document, &self.layout),
            #[cfg(not(feature = "pdf"))]
            ExportFormat::Pdf => Err(PhoneSiftError::ExportUnavailable {
                format: self.format.to_string(),
            }),
        }
    }
}
