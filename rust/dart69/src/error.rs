//! Errors surfaced by the command-line driver.

use prime_core::PrimeError;

#[derive(Debug, thiserror::Error)]
pub enum Dart69Error {
    #[error(transparent)]
    Prime(#[from] PrimeError),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad or missing command-line arguments.
    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, Dart69Error>;
