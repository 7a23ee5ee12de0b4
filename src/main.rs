use anyhow::Context;
use clap::Parser;
use phonesift::{
    BatchPlan, Cli, OutputFormatter, OutputMode, PhoneSift, PhoneSiftError, UserFriendlyError,
};
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(&cli) {
        eprintln!("Warning: {:#}", e);
    }

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let mut app = match PhoneSift::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e, cli.output_mode());
            return exit_code_for(&e);
        }
    };

    let result = match (&cli.file, cli.is_batch()) {
        (Some(file), true) => app.run_batch(file, &BatchPlan::from_cli(&cli)).await,
        (file, _) => app.run_interactive(file.as_deref()).await,
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &PhoneSiftError) -> i32 {
    match error {
        PhoneSiftError::UnsupportedFileType { .. } => 2,
        PhoneSiftError::FileNotFound { .. } => 3,
        PhoneSiftError::FileTooLarge { .. } => 4,
        PhoneSiftError::ExportUnavailable { .. } => 5,
        PhoneSiftError::Export { .. } => 6,
        PhoneSiftError::Config { .. } => 7,
        PhoneSiftError::Cancelled => 130, // Interrupted (SIGINT)
        _ => 1,
    }
}

fn setup_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(cli.log_filter()))
        .context("invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "phonesift.toml".to_string());

    match PhoneSift::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  phonesift <file> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &PhoneSiftError, mode: OutputMode) {
    let formatter = OutputFormatter::new(mode, 0, false);
    formatter.print_user_friendly_error(error);
}
