use crate::error::{PhoneSiftError, Result};
use crate::session::{Command, Session};
use crate::ui::{GracefulShutdown, OutputFormatter, ProgressManager};
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Whether the read loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end over a [`Session`].
///
/// Commands are read and executed strictly one at a time; a `load` is awaited
/// to completion before the next line is read.
pub struct Shell<'a> {
    session: &'a mut Session,
    formatter: &'a OutputFormatter,
    progress: &'a ProgressManager,
    shutdown: &'a GracefulShutdown,
    prompt: bool,
}

impl<'a> Shell<'a> {
    pub fn new(
        session: &'a mut Session,
        formatter: &'a OutputFormatter,
        progress: &'a ProgressManager,
        shutdown: &'a GracefulShutdown,
    ) -> Self {
        Self {
            session,
            formatter,
            progress,
            shutdown,
            prompt: true,
        }
    }

    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        loop {
            self.shutdown.check_shutdown()?;

            if self.prompt {
                self.formatter.print_prompt();
            }

            let line = match lines.next_line().await? {
                Some(line) => line,
                None => break,
            };

            self.shutdown.check_shutdown()?;

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    self.formatter.print_user_friendly_error(&e);
                    continue;
                }
            };

            if self.dispatch(command).await == Flow::Quit {
                break;
            }
        }

        tracing::debug!(numbers = self.session.registry().len(), "session ended");
        Ok(())
    }

    /// Executes one command. Failures are reported and never end the session.
    pub async fn dispatch(&mut self, command: Command) -> Flow {
        match self.execute(command).await {
            Ok(flow) => flow,
            Err(PhoneSiftError::Cancelled) => Flow::Quit,
            Err(e) => {
                tracing::warn!(error = %e, "command failed");
                self.formatter.print_user_friendly_error(&e);
                Flow::Continue
            }
        }
    }

    async fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Empty => {}
            Command::Load(path) => self.load(&path).await?,
            Command::List => {
                self.formatter
                    .print_result_rows("Numbers", &self.session.result_rows());
            }
            Command::All => {
                self.formatter
                    .print_result_rows("All numbers", &self.session.all_rows());
            }
            Command::ToggleStatus(reference) => match self.session.toggle_status(&reference) {
                Some((number, status)) => self.formatter.print_status_change(&number, status),
                None => self.formatter.print_unknown_reference(&reference),
            },
            Command::ToggleFavorite(reference) => {
                match self.session.toggle_favorite(&reference) {
                    Some((number, favorite)) => {
                        self.formatter.print_favorite_change(&number, favorite)
                    }
                    None => self.formatter.print_unknown_reference(&reference),
                }
            }
            Command::Favorites => {
                self.formatter
                    .print_favorites(&self.session.registry().list_favorites());
            }
            Command::Working => {
                self.formatter
                    .print_working(&self.session.registry().list_working());
            }
            Command::Export { kind, format } => {
                let spinner = self
                    .progress
                    .create_spinner(&format!("Writing {} list", kind.label().to_lowercase()));
                let result = self.session.export(kind, format);
                spinner.finish_and_clear();
                self.formatter.print_export_report(&result?);
            }
            Command::Summary => {
                self.formatter
                    .print_summary(&self.session.registry().summary());
            }
            Command::Help => self.formatter.print_help(),
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    async fn load(&mut self, path: &Path) -> Result<()> {
        let spinner = self
            .progress
            .create_spinner(&format!("Reading {}", path.display()));
        let result = self.session.load(path).await;
        spinner.finish_and_clear();

        let outcome = result?;
        self.formatter
            .print_load_outcome(&outcome, &self.session.result_rows());
        Ok(())
    }
}
