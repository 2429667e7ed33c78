//! Interactive command-line front end for the availability-rule wizard.

pub mod output;
pub mod runner;

use thiserror::Error;

pub use runner::{LoggingCacheHook, TerminalNotifier, WizardRunner};

/// Failures surfaced by the interactive driver.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Core(#[from] crate::errors::AvailabilityError),
    #[error("Prompt failed: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}
