//! Configuration System
//!
//! Layered configuration for the CLI: built-in defaults, the user's global
//! config file, an explicit `--config` file, then `GITOPS_*` environment
//! variables. Command-line flags are applied on top by the caller.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Endpoint used when nothing else configures one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitopsConfig {
    /// Base URL of the template catalog API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP client settings for catalog adapters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for GitopsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GitopsConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.endpoint.trim().is_empty() {
            errors.push("Endpoint cannot be empty".to_string());
        }
        if self.http.connect_timeout_secs == 0 {
            errors.push("http.connect_timeout_secs must be greater than zero".to_string());
        }
        if self.http.request_timeout_secs == 0 {
            errors.push("http.request_timeout_secs must be greater than zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
