//! Error handling for the LMS Rust client

use std::fmt;
use thiserror::Error;

/// Unified error type for the LMS Rust client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Application-level failure reported inside a response envelope
    #[error("{message}")]
    Api {
        message: String,
        code: Option<String>,
    },

    /// Authentication failures (401), including an expired session
    #[error("Authentication error: {0}")]
    Unauthorized(String),

    /// Authorization failures (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other non-2xx response
    #[error("Request failed with status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Client configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new envelope-level API error
    pub fn api<T: fmt::Display>(msg: T) -> Self {
        Error::Api {
            message: msg.to_string(),
            code: None,
        }
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// The human-readable message carried by this error
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
