//! Common error types for csync

use thiserror::Error;

/// Common result type for csync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the csync crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Contact store read/write/save failure (fatal to the batch)
    #[error("Store error: {0}")]
    Store(String),

    /// Store persistence (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Row source failure (unreadable input file, malformed CSV framing)
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
