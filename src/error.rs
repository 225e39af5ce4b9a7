//! Error types for normalization, store access and export.

use thiserror::Error;

/// Errors raised while normalizing a raw snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A timestamp key is not a whole, non-negative count of seconds
    /// that maps onto a calendar date.
    #[error("Malformed timestamp key: {key:?}")]
    MalformedKey { key: String },
}

/// Errors that can occur when reading a snapshot from the store.
///
/// Any of these means the store was unavailable for that tick; the
/// normalizer never runs on a failed read.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse the snapshot body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The credential was rejected.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Connection failed (or the snapshot file could not be opened).
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,
}

/// The request URL carries the credential as a query parameter, so it is
/// dropped before the error text is kept.
impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            StoreError::Timeout
        } else if err.is_connect() {
            StoreError::Connection(err.to_string())
        } else {
            StoreError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err.to_string())
    }
}

/// Errors raised while writing a CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
