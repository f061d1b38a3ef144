//! Gateway configuration.
//!
//! The only external setting is the API base URL, read once at startup from
//! the hosting environment.

use crate::error::{FeedeskError, Result};

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "FEEDESK_API_URL";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Configuration for the remote data gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the remote API (e.g., "https://fees.example.com/api").
    /// Paths like "/batches" are appended to this.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl GatewayConfig {
    /// Create a config with the given base URL and the default timeout.
    ///
    /// A trailing slash on the base URL is stripped so path concatenation
    /// stays predictable.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        GatewayConfig {
            base_url,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Read the base URL from `FEEDESK_API_URL`.
    ///
    /// # Errors
    /// Returns a configuration error if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Ok(GatewayConfig::new(url)),
            _ => Err(FeedeskError::Config(format!("{} is not set", API_URL_ENV))),
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
