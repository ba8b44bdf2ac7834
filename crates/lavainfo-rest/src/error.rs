// crates/lavainfo-rest/src/error.rs

use lavainfo_core::SourceError;
use thiserror::Error;

/// Errors raised by the REST client.
#[derive(Debug, Error)]
pub enum RestError {
    /// The configured base URL is not an absolute HTTP(S) URL.
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Connection, TLS, or timeout failure inside reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },
}

impl From<RestError> for SourceError {
    fn from(e: RestError) -> Self {
        match e {
            RestError::Http(ref inner) if inner.is_decode() => SourceError::Parse(e.to_string()),
            other => SourceError::Transport(other.to_string()),
        }
    }
}
