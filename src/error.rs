//! Error types.
//!
//! Only hard failures are errors here. An unknown encoding token or a
//! malformed q-value is resolved to "no compression" rather than reported.
//!
//! - [`EncoderError::InvalidLevel`] is raised while building the encoder,
//!   before any byte is written, so the caller can still abort the response
//!   cleanly.
//! - [`EncoderError::Io`] comes from the copy loop. Part of the body may
//!   already be on the wire, so the response cannot be retried.

use thiserror::Error;

/// Content-encoding errors.
#[derive(Error, Debug)]
pub enum EncoderError {
    /// Compression level outside what the encoder accepts.
    #[error("Invalid compression level: {0} (expected 0-9)")]
    InvalidLevel(u32),

    /// Source read or destination write failed while streaming.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Building the HTTP response failed.
    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias for encoder operations
pub type Result<T> = std::result::Result<T, EncoderError>;

impl From<toml::de::Error> for EncoderError {
    fn from(err: toml::de::Error) -> Self {
        EncoderError::Config(err.to_string())
    }
}
