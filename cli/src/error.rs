//! Error types for the brewgo CLI.
//!
//! Library failures pass through unchanged; the CLI adds the user-input
//! errors that only make sense at the command line.

use brewgo::BrewgoError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while running a brewgo command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Print mode was requested without a module reference.
    #[error("must have at least 1 target to print")]
    NoTargets,

    /// Print mode was requested with more than one module reference.
    #[error("cannot print more than 1 target (got {count})")]
    TooManyTargets {
        /// Number of targets supplied.
        count: usize,
    },

    /// Installation through brew was requested.
    #[error("installing via brew is not supported; rerun with --print to emit the formula")]
    InstallUnsupported,

    /// The formula could not be written to the requested file.
    #[error("failed to write formula to {path}: {source}")]
    Output {
        /// Destination path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Module resolution or rendering failed.
    #[error(transparent)]
    Brewgo(#[from] BrewgoError),
}

/// Result type alias using [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
