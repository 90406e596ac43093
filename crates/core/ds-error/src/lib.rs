//! Error types and classification for drivescan.
//!
//! This crate provides:
//! - [`DsError`] - Top-level error enum for the scanner and its sinks
//! - [`ErrorCategory`] for retry decision making
//! - Classification logic mapping HTTP status codes to retry behavior

use thiserror::Error;

/// Top-level error type for drivescan.
#[derive(Error, Debug)]
pub enum DsError {
    /// Remote API returned a non-success HTTP status.
    ///
    /// The status code is kept so callers can decide whether the
    /// failure is worth retrying.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connect, timeout, broken body)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded into the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration errors (missing or invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// CSV serialization failure
    #[error("CSV error: {0}")]
    Csv(String),

    /// Local I/O failure (output file creation/write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DsError {
    /// Build an API error from a status code and message body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether retrying this error may succeed.
    ///
    /// Shorthand for `classify_error(self) == ErrorCategory::Transient`.
    pub fn is_transient(&self) -> bool {
        classify_error(self) == ErrorCategory::Transient
    }
}

/// Error classification for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transient error - retry with exponential backoff
    ///
    /// Examples: HTTP 429 rate limiting, 5xx server errors, timeouts
    Transient,

    /// Permanent error - never retry, fail the run
    ///
    /// Examples: 404 not found, 403 access denied, bad configuration
    Permanent,
}

/// Classifies an error to determine retry behavior.
///
/// HTTP 429 and any 5xx status are transient; every other API status
/// is permanent. Transport failures (timeouts, resets) are transient.
/// Decode, configuration, and local I/O failures are permanent.
pub fn classify_error(error: &DsError) -> ErrorCategory {
    match error {
        DsError::Api { status, .. } => classify_status(*status),
        DsError::Transport(_) => ErrorCategory::Transient,
        DsError::Decode(_) => ErrorCategory::Permanent,
        DsError::Config(_) => ErrorCategory::Permanent,
        DsError::Csv(_) => ErrorCategory::Permanent,
        DsError::Io(_) => ErrorCategory::Permanent,
        DsError::Other(_) => ErrorCategory::Permanent,
    }
}

/// Classify a bare HTTP status code.
pub fn classify_status(status: u16) -> ErrorCategory {
    if status == 429 || (500..=599).contains(&status) {
        ErrorCategory::Transient
    } else {
        ErrorCategory::Permanent
    }
}

/// Result type alias using DsError.
pub type Result<T> = std::result::Result<T, DsError>;
