//! # Application Errors

use holocron_core::{FetchError, HolocronError};
use thiserror::Error;

/// Errors surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] HolocronError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The configuration file is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    /// The HTTP server failed to bind or crashed.
    #[error("Server error: {0}")]
    Server(String),
}
