pub mod text_loader;

pub use text_loader::{LoadedText, TextLoader};
