//! Environment source: GITOPS_ENDPOINT, GITOPS_HTTP__REQUEST_TIMEOUT_SECS, ...

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Add `GITOPS_*` environment variables to builder. Nested keys use `__`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("GITOPS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
