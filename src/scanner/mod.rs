pub mod file_filter;
pub mod number_scanner;

pub use file_filter::{FileFilter, FileVerdict};
pub use number_scanner::{extract_numbers, Extraction, NumberScanner, PhoneNumber};
