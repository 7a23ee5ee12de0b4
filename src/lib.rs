pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod registry;
pub mod scanner;
pub mod session;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ExportConfig, InputConfig, LayoutConfig};
pub use error::{PhoneSiftError, Result, UserFriendlyError};

// Core functionality re-exports
pub use export::{ExportFormat, ExportList, ExportReport, Exporter, ListDocument, ListKind};
pub use loader::{LoadedText, TextLoader};
pub use registry::{NumberRecord, NumberRegistry, NumberStatus, RegistrySummary};
pub use scanner::{extract_numbers, Extraction, FileFilter, NumberScanner, PhoneNumber};
pub use session::{Command, LoadOutcome, Session, Shell};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};

use std::io::IsTerminal;
use std::path::Path;
use tokio::io::BufReader;

/// What a batch run should do after loading its file.
#[derive(Debug, Clone, Default)]
pub struct BatchPlan {
    pub working: Vec<String>,
    pub favorites: Vec<String>,
    pub exports: Vec<ListKind>,
}

impl BatchPlan {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            working: cli.working.clone(),
            favorites: cli.favorite.clone(),
            exports: cli.export.clone(),
        }
    }
}

/// Main library interface for PhoneSift functionality
pub struct PhoneSift {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
    session: Session,
}

impl PhoneSift {
    /// Create a new PhoneSift instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let shutdown = GracefulShutdown::new()?;
        Ok(Self::with_shutdown(config, output_mode, verbose, quiet, shutdown))
    }

    /// Create a new PhoneSift instance for testing (no signal handler conflicts)
    pub fn new_for_test(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self::with_shutdown(
            config,
            output_mode,
            verbose,
            quiet,
            GracefulShutdown::new_for_test(),
        )
    }

    fn with_shutdown(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
        shutdown: GracefulShutdown,
    ) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);
        let session = Session::new(&config);

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
            session,
        }
    }

    /// Create PhoneSift instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Self::new(
            config,
            cli_args.output_mode(),
            cli_args.verbosity_level(),
            cli_args.quiet,
        )
    }

    /// Load one file, apply the plan's marks, export the requested lists.
    ///
    /// The first load or export failure ends the run; references that match
    /// no number are reported and skipped.
    pub async fn run_batch(&mut self, file: &Path, plan: &BatchPlan) -> Result<()> {
        self.shutdown.check_shutdown()?;

        let spinner = self
            .progress_manager
            .create_spinner(&format!("Reading {}", file.display()));
        let loaded = self.session.load(file).await;
        spinner.finish_and_clear();
        let outcome = loaded?;

        for reference in &plan.working {
            if self
                .session
                .set_status(reference, NumberStatus::Working)
                .is_none()
            {
                self.output_formatter.print_unknown_reference(reference);
            }
        }

        for reference in &plan.favorites {
            if self.session.set_favorite(reference, true).is_none() {
                self.output_formatter.print_unknown_reference(reference);
            }
        }

        self.output_formatter
            .print_load_outcome(&outcome, &self.session.result_rows());

        for kind in &plan.exports {
            self.shutdown.check_shutdown()?;
            let report = self.session.export(*kind, None)?;
            self.output_formatter.print_export_report(&report);
        }

        tracing::info!(
            file = %file.display(),
            exports = plan.exports.len(),
            "batch run complete"
        );
        Ok(())
    }

    /// Run the interactive session over stdin, loading `file` first if given.
    pub async fn run_interactive(&mut self, file: Option<&Path>) -> Result<()> {
        let interactive = std::io::stdin().is_terminal();
        if interactive && self.output_formatter.mode() == OutputMode::Human {
            self.output_formatter
                .info("Type `help` for the list of commands, `quit` to leave.");
        }

        let mut shell = Shell::new(
            &mut self.session,
            &self.output_formatter,
            &self.progress_manager,
            &self.shutdown,
        )
        .with_prompt(interactive);

        if let Some(file) = file {
            shell.dispatch(Command::Load(file.to_path_buf())).await;
        }

        let result = shell.run(BufReader::new(tokio::io::stdin())).await;
        self.progress_manager.clear();
        result
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Check if shutdown has been requested
    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    /// Request graceful shutdown
    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &PhoneSiftError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get build information
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        build_date: option_env!("BUILD_DATE").unwrap_or("unknown"),
        target: std::env::consts::ARCH.to_string(),
        pdf_export: cfg!(feature = "pdf"),
    }
}

#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_date: &'static str,
    pub target: String,
    pub pdf_export: bool,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PhoneSift {} ({}) built on {} for {}{}",
            self.version,
            self.git_hash,
            self.build_date,
            self.target,
            if self.pdf_export { "" } else { " without PDF export" }
        )
    }
}
