//! Merge rules: defaults, override order, conflict handling.

use crate::config::DEFAULT_ENDPOINT;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("endpoint", DEFAULT_ENDPOINT)?
        .set_default("http.connect_timeout_secs", 10)?
        .set_default("http.request_timeout_secs", 120)
}
