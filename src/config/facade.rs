//! Config loader: assembles sources in precedence order and validates the result.

use super::merge::merge_policy;
use super::sources::{environment, explicit_file, global_file};
use super::GitopsConfig;
use crate::error::ApiError;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// Precedence (lowest to highest): defaults, global config file,
    /// `config_path` when given, `GITOPS_*` environment variables.
    pub fn load(config_path: Option<&Path>) -> Result<GitopsConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = match config_path {
            Some(path) => explicit_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder);

        let config: GitopsConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            ))
        })?;
        debug!(endpoint = %config.endpoint, "Configuration loaded");
        Ok(config)
    }
}
