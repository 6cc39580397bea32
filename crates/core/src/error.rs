//! Error types for plainify operations.
//!
//! The conversion pipeline itself never fails: malformed markup degrades to
//! best-effort output. [`PlainifyError`] covers everything around it, such as
//! configuration, loading files, and fetching URLs.
//!
//! # Example
//!
//! ```rust
//! use plainify_core::{ConversionConfig, PlainifyError};
//!
//! let mut config = ConversionConfig::default();
//! match config.set_option("colour", "blue") {
//!     Err(PlainifyError::UnknownOption(name)) => assert_eq!(name, "colour"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for plainify operations.
#[derive(Error, Debug)]
pub enum PlainifyError {
    /// An option name that the converter does not recognize.
    ///
    /// This is a usage error: the caller asked to set something that does
    /// not exist. Unrecognized option *values* never produce an error, they
    /// fall back to defaults instead.
    #[error("Invalid argument: unknown option '{0}'")]
    UnknownOption(String),

    /// HTTP request errors from reqwest.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Wraps standard I/O errors for file and stdin operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file errors.
    ///
    /// Returned when a config file is not valid JSON or is not an object.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for PlainifyError.
pub type Result<T> = std::result::Result<T, PlainifyError>;
