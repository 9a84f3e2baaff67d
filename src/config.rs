//! Configuration options for the LMS client

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Connection settings for an LMS backend.
///
/// It's recommended to load these values from environment variables or a
/// secure config source.
#[derive(Debug, Clone)]
pub struct LmsConfig {
    /// The base URL of the LMS REST API
    pub base_url: Url,
}

impl LmsConfig {
    /// Creates a new configuration, validating the URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("not a valid base URL: {base_url}")));
        }
        Ok(Self { base_url })
    }

    /// Attempts to create configuration from the `LMS_API_BASE_URL`
    /// environment variable.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("LMS_API_BASE_URL").map_err(|_| {
            Error::config("LMS_API_BASE_URL environment variable not found")
        })?;
        Self::new(&base_url)
    }

    /// The base URL without a trailing slash, ready for path concatenation.
    pub(crate) fn origin(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}

/// Behavioural options for the LMS client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Whether a 401 response triggers a transparent token refresh
    pub auto_refresh_token: bool,

    /// The request timeout, applied uniformly to every request
    /// including the refresh call
    pub request_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            auto_refresh_token: true,
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl ClientOptions {
    /// Set whether to automatically refresh the token on a 401
    pub fn with_auto_refresh_token(mut self, value: bool) -> Self {
        self.auto_refresh_token = value;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Duration) -> Self {
        self.request_timeout = value;
        self
    }
}
