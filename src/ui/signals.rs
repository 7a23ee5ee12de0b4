use crate::error::{PhoneSiftError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// What an interrupt asks the process to do, given how many came before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Finish the command in flight, then leave the session loop.
    Stop,
    /// Exit immediately with status 130.
    ForceExit,
}

impl Interrupt {
    fn after(previous: usize) -> Self {
        if previous == 0 {
            Interrupt::Stop
        } else {
            Interrupt::ForceExit
        }
    }
}

/// Ctrl+C handling for the session loop.
///
/// Interrupts are counted. The session polls the count between commands, so
/// a read or export in progress always completes; a second interrupt exits.
#[derive(Debug, Clone)]
pub struct GracefulShutdown {
    interrupts: Arc<AtomicUsize>,
}

impl GracefulShutdown {
    /// Installs the process-wide Ctrl+C handler. Only one may exist.
    pub fn new() -> Result<Self> {
        let shutdown = Self::new_for_test();
        let interrupts = Arc::clone(&shutdown.interrupts);

        ctrlc::set_handler(move || match record(&interrupts) {
            Interrupt::Stop => {
                eprintln!("\n🛑 Stopping after the current command (Ctrl+C again to exit now)");
            }
            Interrupt::ForceExit => {
                eprintln!("\n💀 Exiting");
                std::process::exit(130);
            }
        })
        .map_err(|e| PhoneSiftError::Config {
            message: format!("Failed to set signal handler: {}", e),
        })?;

        Ok(shutdown)
    }

    /// A shutdown flag with no signal handler behind it.
    pub fn new_for_test() -> Self {
        Self {
            interrupts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn interrupts(&self) -> usize {
        self.interrupts.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        self.interrupts() == 0
    }

    /// `Err(Cancelled)` once any interrupt has arrived.
    pub fn check_shutdown(&self) -> Result<()> {
        if self.is_running() {
            Ok(())
        } else {
            Err(PhoneSiftError::Cancelled)
        }
    }

    /// Counts as one interrupt, without the process exit a second one implies.
    pub fn request_shutdown(&self) -> Interrupt {
        record(&self.interrupts)
    }
}

fn record(interrupts: &AtomicUsize) -> Interrupt {
    let previous = interrupts.fetch_add(1, Ordering::SeqCst);
    tracing::debug!(count = previous + 1, "interrupt received");
    Interrupt::after(previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_interrupt_stops_the_loop() {
        let shutdown = GracefulShutdown::new_for_test();
        assert!(shutdown.is_running());
        assert!(shutdown.check_shutdown().is_ok());

        assert_eq!(shutdown.request_shutdown(), Interrupt::Stop);
        assert!(!shutdown.is_running());
        assert!(matches!(
            shutdown.check_shutdown(),
            Err(PhoneSiftError::Cancelled)
        ));
    }

    #[test]
    fn test_second_interrupt_forces_exit() {
        let shutdown = GracefulShutdown::new_for_test();

        assert_eq!(shutdown.request_shutdown(), Interrupt::Stop);
        assert_eq!(shutdown.request_shutdown(), Interrupt::ForceExit);
        assert_eq!(shutdown.request_shutdown(), Interrupt::ForceExit);
        assert_eq!(shutdown.interrupts(), 3);
    }

    #[test]
    fn test_clones_share_the_count() {
        let shutdown = GracefulShutdown::new_for_test();
        let seen_by_session = shutdown.clone();

        shutdown.request_shutdown();
        assert!(seen_by_session.check_shutdown().is_err());
    }
}
