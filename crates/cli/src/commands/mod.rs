//! Subcommand implementations.

pub mod check_field;
pub mod run;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading the script or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
