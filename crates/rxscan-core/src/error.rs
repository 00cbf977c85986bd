//! Error types for the rxscan-core library.

use thiserror::Error;

/// Main error type for the rxscan library.
#[derive(Error, Debug)]
pub enum RxScanError {
    /// Scan decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors produced while decoding a scanned element string.
///
/// Field-level problems (a malformed expiry, a missing lot) are not errors;
/// they surface as absent fields on [`crate::DecodedScan`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// No grammar recovered a GTIN. Carries the raw input for diagnostics.
    #[error("unrecognized barcode data: {0:?}")]
    Unrecognized(String),
}

impl DecodeError {
    /// The raw text that failed to decode.
    pub fn raw(&self) -> &str {
        match self {
            DecodeError::Unrecognized(raw) => raw,
        }
    }
}

/// Result type for the rxscan library.
pub type Result<T> = std::result::Result<T, RxScanError>;
