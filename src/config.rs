use crate::error::{PhoneSiftError, Result};
use crate::export::ExportFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub rejected_extensions: Vec<String>,
    pub max_file_size: u64,
    pub sniff_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_directory: PathBuf,
    pub format: ExportFormat,
    pub layout: LayoutConfig,
}

/// Page geometry for exported lists, in millimetres on an A4 page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub title_font_size: f32,
    pub body_font_size: f32,
    pub title_x: f32,
    pub title_y: f32,
    pub rule_y: f32,
    pub rule_x_end: f32,
    pub rule_width: f32,
    pub body_x: f32,
    pub first_line_y: f32,
    pub line_height: f32,
    pub page_break_y: f32,
    pub continuation_y: f32,
    pub page_width: f32,
    pub page_height: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            rejected_extensions: vec![
                "pdf".to_string(),
                "doc".to_string(),
                "docx".to_string(),
                "xls".to_string(),
                "xlsx".to_string(),
                "png".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "gif".to_string(),
                "zip".to_string(),
            ],
            max_file_size: 10 * 1024 * 1024, // 10MB
            sniff_bytes: 1024,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            format: ExportFormat::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            title_font_size: 20.0,
            body_font_size: 12.0,
            title_x: 10.0,
            title_y: 15.0,
            rule_y: 17.0,
            rule_x_end: 200.0,
            rule_width: 0.5,
            body_x: 20.0,
            first_line_y: 30.0,
            line_height: 7.0,
            page_break_y: 280.0,
            continuation_y: 15.0,
            page_width: 210.0,
            page_height: 297.0,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PhoneSiftError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PhoneSiftError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| PhoneSiftError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["phonesift.toml", ".phonesift.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref output_dir) = cli_args.output_dir {
            self.export.output_directory = output_dir.clone();
        }

        if let Some(format) = cli_args.export_format {
            self.export.format = format;
        }

        if let Some(max_size) = cli_args.max_file_size {
            self.input.max_file_size = max_size;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| PhoneSiftError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| PhoneSiftError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.max_file_size == 0 {
            return Err(PhoneSiftError::Config {
                message: "Maximum file size must be greater than 0".to_string(),
            });
        }

        if self.input.sniff_bytes == 0 {
            return Err(PhoneSiftError::Config {
                message: "Header sniff length must be greater than 0".to_string(),
            });
        }

        self.export.layout.validate()
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        if self.line_height <= 0.0 {
            return Err(PhoneSiftError::Config {
                message: "Line height must be greater than 0".to_string(),
            });
        }

        if self.title_font_size <= 0.0 || self.body_font_size <= 0.0 {
            return Err(PhoneSiftError::Config {
                message: "Font sizes must be greater than 0".to_string(),
            });
        }

        if self.page_break_y < self.first_line_y || self.page_break_y < self.continuation_y {
            return Err(PhoneSiftError::Config {
                message: format!(
                    "Page break offset {} must not be above the first line offsets",
                    self.page_break_y
                ),
            });
        }

        if self.page_break_y > self.page_height {
            return Err(PhoneSiftError::Config {
                message: format!(
                    "Page break offset {} lies outside the page height {}",
                    self.page_break_y, self.page_height
                ),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub export_format: Option<ExportFormat>,
    pub max_file_size: Option<u64>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_export_format(mut self, format: Option<ExportFormat>) -> Self {
        self.export_format = format;
        self
    }

    pub fn with_max_file_size(mut self, max_size: Option<u64>) -> Self {
        self.max_file_size = max_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.input.rejected_extensions.contains(&"pdf".to_string()));
        assert_eq!(config.export.layout.page_break_y, 280.0);
        assert_eq!(config.export.layout.first_line_y, 30.0);
        assert_eq!(config.export.format, ExportFormat::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.input.max_file_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.export.layout.line_height = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.export.layout.page_break_y = 20.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.export.layout.page_break_y = 400.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.export.layout.line_height = 9.5;
        config.export.format = ExportFormat::Text;
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.export.layout, config.export.layout);
        assert_eq!(loaded_config.export.format, ExportFormat::Text);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[export]\nformat = \"text\"\n").unwrap();

        assert_eq!(config.export.format, ExportFormat::Text);
        assert_eq!(config.export.layout, LayoutConfig::default());
        assert_eq!(config.input.max_file_size, 10 * 1024 * 1024);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(PhoneSiftError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_output_dir(Some(PathBuf::from("exports")))
            .with_export_format(Some(ExportFormat::Text))
            .with_max_file_size(Some(2048));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.export.output_directory, PathBuf::from("exports"));
        assert_eq!(config.export.format, ExportFormat::Text);
        assert_eq!(config.input.max_file_size, 2048);
    }

    #[test]
    fn test_save_to_unwritable_path_is_config_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let target = temp_dir.path().join("no-such-dir").join("phonesift.toml");

        let result = Config::default().save_to_file(&target);
        assert!(matches!(result, Err(PhoneSiftError::Config { .. })));
    }
}
