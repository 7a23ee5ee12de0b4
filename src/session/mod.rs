//! Session state for one run of the tool.
//!
//! A [`Session`] owns the registry and the most recent result list. It is
//! built once and driven by a single event loop, so every registry mutation
//! happens on one logical thread and only after a file has been read in full.

pub mod command;
pub mod shell;

pub use command::{Command, HELP_TEXT};
pub use shell::{Flow, Shell};

use crate::config::Config;
use crate::error::Result;
use crate::export::{ExportFormat, ExportList, ExportReport, Exporter, ListKind};
use crate::loader::TextLoader;
use crate::registry::{NumberRecord, NumberRegistry, NumberStatus};
use crate::scanner::{Extraction, NumberScanner, PhoneNumber};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct LoadOutcome {
    pub path: PathBuf,
    pub bytes: u64,
    pub lossy: bool,
    pub extraction: Extraction,
    pub newly_registered: usize,
}

/// A row of the result list: 1-based position, number and its current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub index: usize,
    pub number: PhoneNumber,
    #[serde(flatten)]
    pub record: NumberRecord,
}

pub struct Session {
    registry: NumberRegistry,
    scanner: NumberScanner,
    loader: TextLoader,
    exporter: Exporter,
    results: Vec<PhoneNumber>,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            registry: NumberRegistry::new(),
            scanner: NumberScanner::new(),
            loader: TextLoader::new(&config.input),
            exporter: Exporter::new(&config.export),
            results: Vec::new(),
        }
    }

    /// Reads `path`, extracts its numbers and merges them into the registry.
    ///
    /// Nothing changes when the file is rejected or cannot be read.
    pub async fn load(&mut self, path: &Path) -> Result<LoadOutcome> {
        let loaded = self.loader.load(path).await?;
        let (extraction, newly_registered) = self.ingest_text(&loaded.content);

        tracing::info!(
            path = %loaded.path.display(),
            found = extraction.len(),
            new = newly_registered,
            "extraction complete"
        );

        Ok(LoadOutcome {
            path: loaded.path,
            bytes: loaded.bytes,
            lossy: loaded.lossy,
            extraction,
            newly_registered,
        })
    }

    /// Extracts numbers from already-available text and registers them.
    pub fn ingest_text(&mut self, text: &str) -> (Extraction, usize) {
        let extraction = self.scanner.extract(text);
        let newly_registered = self.registry.register_all(&extraction.numbers);
        self.results = extraction.numbers.clone();
        (extraction, newly_registered)
    }

    /// Resolves a 1-based result index or a literal registered number.
    pub fn resolve(&self, reference: &str) -> Option<PhoneNumber> {
        let reference = reference.trim();

        if let Ok(index) = reference.parse::<usize>() {
            if index >= 1 && index <= self.results.len() {
                return Some(self.results[index - 1].clone());
            }
        }

        if self.registry.contains(reference) {
            return Some(PhoneNumber::from(reference));
        }

        None
    }

    fn resolve_or_log(&self, reference: &str) -> Option<PhoneNumber> {
        let number = self.resolve(reference);
        if number.is_none() {
            tracing::debug!(reference, "ignoring reference to unknown number");
        }
        number
    }

    pub fn toggle_status(&mut self, reference: &str) -> Option<(PhoneNumber, NumberStatus)> {
        let number = self.resolve_or_log(reference)?;
        let status = self.registry.toggle_status(number.as_str())?;
        Some((number, status))
    }

    pub fn toggle_favorite(&mut self, reference: &str) -> Option<(PhoneNumber, bool)> {
        let number = self.resolve_or_log(reference)?;
        let favorite = self.registry.toggle_favorite(number.as_str())?;
        Some((number, favorite))
    }

    /// Brings a number to `status`, toggling only when it differs.
    pub fn set_status(
        &mut self,
        reference: &str,
        status: NumberStatus,
    ) -> Option<(PhoneNumber, NumberStatus)> {
        let number = self.resolve_or_log(reference)?;
        if self.registry.get_status(number.as_str()) != status {
            self.registry.toggle_status(number.as_str())?;
        }
        Some((number, status))
    }

    pub fn set_favorite(&mut self, reference: &str, favorite: bool) -> Option<(PhoneNumber, bool)> {
        let number = self.resolve_or_log(reference)?;
        if self.registry.is_favorite(number.as_str()) != favorite {
            self.registry.toggle_favorite(number.as_str())?;
        }
        Some((number, favorite))
    }

    pub fn result_rows(&self) -> Vec<ResultRow> {
        self.rows(self.results.iter())
    }

    pub fn all_rows(&self) -> Vec<ResultRow> {
        self.rows(self.registry.iter().map(|(number, _)| number))
    }

    fn rows<'a, I>(&self, numbers: I) -> Vec<ResultRow>
    where
        I: Iterator<Item = &'a PhoneNumber>,
    {
        numbers
            .enumerate()
            .map(|(i, number)| ResultRow {
                index: i + 1,
                number: number.clone(),
                record: self.registry.record(number.as_str()).unwrap_or_default(),
            })
            .collect()
    }

    pub fn export(&self, kind: ListKind, format: Option<ExportFormat>) -> Result<ExportReport> {
        let list = ExportList::from_registry(kind, &self.registry);

        match format {
            Some(format) if format != self.exporter.format() => {
                self.exporter.clone().with_format(format).export(&list)
            }
            _ => self.exporter.export(&list),
        }
    }

    pub fn registry(&self) -> &NumberRegistry {
        &self.registry
    }

    pub fn results(&self) -> &[PhoneNumber] {
        &self.results
    }
}
