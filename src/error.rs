//! Error types for netgrep.
//!
//! Uses `thiserror` for ergonomic error definitions. Recoverable
//! conditions (a bad network string, an unreadable file) are handled as
//! warnings where they occur; only failures of the output stream itself
//! surface here.

use std::io;
use thiserror::Error;

/// Top-level error type for CLI execution.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
