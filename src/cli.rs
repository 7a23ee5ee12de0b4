use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::export::{ExportFormat, ListKind};
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "phonesift")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract phone numbers from text files and export curated lists")]
#[command(
    long_about = "PhoneSift reads plain-text files, pulls out everything that looks like a \
                  phone number, lets you mark each one WORKING or DEAD and favorite it, \
                  and exports the favorites and working lists as documents."
)]
#[command(before_help = "📞 PhoneSift - Phone Number Extraction Tool")]
#[command(after_help = "EXAMPLES:\n  \
    phonesift contacts.txt\n  \
    phonesift contacts.txt --batch --output-format json\n  \
    phonesift contacts.txt -w 1,3 -f 1 -e favorites,working -o exports\n  \
    phonesift notes.txt -w \"(987) 654-3210\" -e working --export-format text\n  \
    phonesift --generate-config --config phonesift.toml")]
pub struct Cli {
    /// Text file to load at start-up
    pub file: Option<PathBuf>,

    /// Directory for exported documents
    #[arg(short, long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(
        short,
        long,
        env = "PHONESIFT_CONFIG",
        help = "Path to TOML configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Document format for exported lists
    #[arg(long, value_enum)]
    pub export_format: Option<ExportFormat>,

    /// Maximum input file size
    #[arg(
        long,
        value_parser = parse_size_string,
        help = "Maximum text file size to read (e.g. 512KB, 10MB)"
    )]
    pub max_size: Option<u64>,

    /// Numbers to mark WORKING (row number or number text, comma-separated)
    #[arg(short, long, value_delimiter = ',', requires = "file")]
    pub working: Vec<String>,

    /// Numbers to mark favorite (row number or number text, comma-separated)
    #[arg(short, long, value_delimiter = ',', requires = "file")]
    pub favorite: Vec<String>,

    /// Lists to export after the batch run (comma-separated)
    #[arg(short, long, value_enum, value_delimiter = ',', requires = "file")]
    pub export: Vec<ListKind>,

    /// Run non-interactively: load FILE, apply marks, export, exit
    #[arg(long, requires = "file")]
    pub batch: bool,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_output_dir(self.output_dir.clone())
            .with_export_format(self.export_format)
            .with_max_file_size(self.max_size)
    }

    /// Batch mode is explicit, or implied by any batch-only action.
    pub fn is_batch(&self) -> bool {
        self.batch
            || !self.working.is_empty()
            || !self.favorite.is_empty()
            || !self.export.is_empty()
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_format.into()
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Default tracing filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> String {
        let level = if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };
        format!("phonesift={}", level)
    }
}

pub fn parse_size_string(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim().to_lowercase();

    let (number_str, multiplier) = if s.ends_with("kb") || s.ends_with('k') {
        (s.trim_end_matches("kb").trim_end_matches('k'), 1024)
    } else if s.ends_with("mb") || s.ends_with('m') {
        (s.trim_end_matches("mb").trim_end_matches('m'), 1024 * 1024)
    } else if s.ends_with("gb") || s.ends_with('g') {
        (
            s.trim_end_matches("gb").trim_end_matches('g'),
            1024 * 1024 * 1024,
        )
    } else if s.ends_with('b') {
        (s.trim_end_matches('b'), 1)
    } else {
        (s.as_str(), 1)
    };

    let number: f64 = number_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number format: {}", number_str))?;

    if number < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    Ok((number * multiplier as f64) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("phonesift").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_interactive_by_default() {
        let cli = parse(&["contacts.txt"]);
        assert_eq!(cli.file, Some(PathBuf::from("contacts.txt")));
        assert!(!cli.is_batch());
        assert_eq!(cli.output_mode(), OutputMode::Human);

        let cli = parse(&[]);
        assert!(cli.file.is_none());
        assert!(!cli.is_batch());
    }

    #[test]
    fn test_batch_lists() {
        let cli = parse(&[
            "contacts.txt",
            "-w",
            "1,3",
            "-f",
            "(987) 654-3210",
            "-e",
            "favorites,working",
            "--export-format",
            "text",
        ]);

        assert!(cli.is_batch());
        assert!(parse(&["contacts.txt", "-e", "working"]).is_batch());
        assert!(parse(&["contacts.txt", "--batch"]).is_batch());
        assert_eq!(cli.working, vec!["1", "3"]);
        assert_eq!(cli.favorite, vec!["(987) 654-3210"]);
        assert_eq!(cli.export, vec![ListKind::Favorites, ListKind::Working]);
        assert_eq!(cli.export_format, Some(ExportFormat::Text));
    }

    #[test]
    fn test_batch_actions_require_file() {
        let result = Cli::try_parse_from(["phonesift", "--export", "working"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["phonesift", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_filter_follows_verbosity() {
        assert_eq!(parse(&[]).log_filter(), "phonesift=warn");
        assert_eq!(parse(&["-q"]).log_filter(), "phonesift=error");
        assert_eq!(parse(&["-v"]).log_filter(), "phonesift=info");
        assert_eq!(parse(&["-vv"]).log_filter(), "phonesift=debug");
        assert_eq!(parse(&["-vvvv"]).log_filter(), "phonesift=trace");
    }

    #[test]
    fn test_cli_overrides() {
        let cli = parse(&["a.txt", "-o", "exports", "--max-size", "2MB"]);
        let overrides = cli.create_cli_overrides();

        assert_eq!(overrides.output_dir, Some(PathBuf::from("exports")));
        assert_eq!(overrides.max_file_size, Some(2 * 1024 * 1024));
        assert_eq!(overrides.export_format, None);
    }

    #[test]
    fn test_parse_size_string() {
        assert_eq!(parse_size_string("10").unwrap(), 10);
        assert_eq!(parse_size_string("10KB").unwrap(), 10 * 1024);
        assert_eq!(parse_size_string("5MB").unwrap(), 5 * 1024 * 1024);
        assert_eq!(parse_size_string("1GB").unwrap(), 1024 * 1024 * 1024);

        assert!(parse_size_string("invalid").is_err());
        assert!(parse_size_string("-5MB").is_err());
    }
}
