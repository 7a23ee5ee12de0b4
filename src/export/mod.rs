pub mod exporter;
pub mod list_document;
#[cfg(feature = "pdf")]
pub mod pdf_writer;

pub use exporter::{ExportReport, Exporter};
pub use list_document::{ListDocument, Page, PlacedLine};

use crate::registry::{NumberRegistry, NumberStatus};
use crate::scanner::PhoneNumber;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Paginated PDF document
    #[default]
    Pdf,
    /// Plain text, pages separated by form feeds
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Text => "txt",
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            ExportFormat::Pdf => cfg!(feature = "pdf"),
            ExportFormat::Text => true,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "pdf" => Some(ExportFormat::Pdf),
            "text" | "txt" => Some(ExportFormat::Text),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => f.write_str("pdf"),
            ExportFormat::Text => f.write_str("text"),
        }
    }
}

/// The two derived lists that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Favorites,
    Working,
}

impl ListKind {
    pub fn label(&self) -> &'static str {
        match self {
            ListKind::Favorites => "Favorites",
            ListKind::Working => "Working",
        }
    }

    pub fn title(&self) -> String {
        format!("{} Phone Numbers List", self.label())
    }

    pub fn file_name(&self, format: ExportFormat) -> String {
        format!(
            "{}_phone_numbers.{}",
            self.label().to_lowercase(),
            format.extension()
        )
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "favorites" | "favourites" | "favs" => Some(ListKind::Favorites),
            "working" => Some(ListKind::Working),
            _ => None,
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportEntry {
    pub number: PhoneNumber,
    /// Present only for lists that annotate status.
    pub status: Option<NumberStatus>,
}

impl ExportEntry {
    /// Numbered line text, `index` counting from 1.
    pub fn line(&self, index: usize) -> String {
        match self.status {
            Some(status) => format!(
                "{}. {} [Status: {}]",
                index,
                self.number.printable(),
                status
            ),
            None => format!("{}. {}", index, self.number.printable()),
        }
    }
}

/// Ordered input handed to the document backends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportList {
    pub kind: ListKind,
    pub entries: Vec<ExportEntry>,
}

impl ExportList {
    pub fn from_registry(kind: ListKind, registry: &NumberRegistry) -> Self {
        let entries = match kind {
            ListKind::Favorites => registry
                .list_favorites()
                .into_iter()
                .map(|(number, status)| ExportEntry {
                    number,
                    status: Some(status),
                })
                .collect(),
            ListKind::Working => registry
                .list_working()
                .into_iter()
                .map(|number| ExportEntry {
                    number,
                    status: None,
                })
                .collect(),
        };

        Self { kind, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(values: &[&str]) -> NumberRegistry {
        let numbers: Vec<PhoneNumber> = values.iter().map(|v| PhoneNumber::from(*v)).collect();
        let mut registry = NumberRegistry::new();
        registry.register_all(&numbers);
        registry
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            ListKind::Favorites.file_name(ExportFormat::Pdf),
            "favorites_phone_numbers.pdf"
        );
        assert_eq!(
            ListKind::Working.file_name(ExportFormat::Pdf),
            "working_phone_numbers.pdf"
        );
        assert_eq!(
            ListKind::Working.file_name(ExportFormat::Text),
            "working_phone_numbers.txt"
        );
    }

    #[test]
    fn test_titles() {
        assert_eq!(ListKind::Favorites.title(), "Favorites Phone Numbers List");
        assert_eq!(ListKind::Working.title(), "Working Phone Numbers List");
    }

    #[test]
    fn test_parsing() {
        assert_eq!(ListKind::parse("Favorites"), Some(ListKind::Favorites));
        assert_eq!(ListKind::parse("working"), Some(ListKind::Working));
        assert_eq!(ListKind::parse("dead"), None);
        assert_eq!(ExportFormat::parse("TXT"), Some(ExportFormat::Text));
        assert_eq!(ExportFormat::parse("docx"), None);
    }

    #[test]
    fn test_favorites_list_carries_status() {
        let mut registry = registry_with(&["111-000-0000", "222-000-0000"]);
        registry.toggle_favorite("222-000-0000");
        registry.toggle_favorite("111-000-0000");
        registry.toggle_status("222-000-0000");

        let list = ExportList::from_registry(ListKind::Favorites, &registry);
        let lines: Vec<String> = list
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| e.line(i + 1))
            .collect();

        assert_eq!(
            lines,
            vec![
                "1. 111-000-0000 [Status: DEAD]",
                "2. 222-000-0000 [Status: WORKING]",
            ]
        );
    }

    #[test]
    fn test_working_list_has_no_annotation() {
        let mut registry = registry_with(&["111-000-0000", "(222) 000-0000"]);
        registry.toggle_status("(222) 000-0000");

        let list = ExportList::from_registry(ListKind::Working, &registry);
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries[0].status, None);
        assert_eq!(list.entries[0].line(1), "1. (222) 000-0000");
    }

    #[test]
    fn test_text_is_always_available() {
        assert!(ExportFormat::Text.is_available());
        assert_eq!(ExportFormat::Pdf.is_available(), cfg!(feature = "pdf"));
    }
}
