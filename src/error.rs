//! Error types for covermap.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CovermapError>;

/// Errors surfaced to callers.
///
/// The derivation components never return these for bad camera data; they
/// skip the offending record and log a warning. Errors are reserved for
/// malformed input shape and invalid configuration.
#[derive(Debug, Error)]
pub enum CovermapError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationErrorWithContext(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
