//! Error types for the paperfeed plugin.
//!
//! This module defines the centralized error type [`PaperfeedError`] and a type
//! alias [`Result`] used throughout the crate. Fetch failures never escape the
//! controllers: they are converted into a `Failed` load state carrying a short
//! user-facing message. The variants here exist for the code paths around the
//! controllers (configuration, theme loading, input parsing, decoding).

use thiserror::Error;

/// The main error type for paperfeed operations.
///
/// # Examples
///
/// ```
/// use paperfeed::PaperfeedError;
///
/// fn parse_page(input: &str) -> Result<u32, PaperfeedError> {
///     input
///         .parse()
///         .map_err(|_| PaperfeedError::Validation(format!("not a page number: {input}")))
/// }
///
/// assert!(parse_page("x").is_err());
/// ```
#[derive(Debug, Error)]
pub enum PaperfeedError {
    /// Transport-level failure talking to the backend.
    ///
    /// Covers non-2xx responses and requests Zellij could not complete.
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed user input (for example a custom date that is not `YYYY-MM-DD`).
    ///
    /// Filter values themselves are constrained enumerations and sets, so
    /// this only originates at the text-entry boundary.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PaperfeedError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for paperfeed operations.
pub type Result<T> = std::result::Result<T, PaperfeedError>;
