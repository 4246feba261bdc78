//! CLI route: single route table and run context. Dispatches to the catalog reporter.

use crate::adapters::HttpClient;
use crate::capi::{self, CreatePullRequestParams, Credential, CredentialsRetriever, OutputFormat};
use crate::config::{ConfigLoader, GitopsConfig};
use crate::error::ApiError;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, Instrument};

use crate::cli::command_name;
use crate::cli::parse::{AddCommands, Commands, GetCommands};

/// Runtime context for CLI execution: resolved configuration and the catalog client.
pub struct RunContext {
    config: GitopsConfig,
    client: HttpClient,
}

impl RunContext {
    /// Create run context from an optional endpoint override and config path. Uses ConfigLoader only.
    pub fn new(endpoint: Option<String>, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Self::from_config(config, endpoint)
    }

    /// Create run context from an already loaded configuration.
    pub fn from_config(
        mut config: GitopsConfig,
        endpoint: Option<String>,
    ) -> Result<Self, ApiError> {
        if let Some(endpoint) = endpoint {
            config.endpoint = endpoint;
        }
        let client = HttpClient::new(&config.endpoint, &config.http)?;
        Ok(Self { config, client })
    }

    /// Resolved configuration.
    pub fn config(&self) -> &GitopsConfig {
        &self.config
    }

    /// Endpoint of the catalog client.
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Execute a CLI command on a dedicated current-thread runtime.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(ApiError::ConfigError(
                "Cannot block on a command from within an async runtime; use execute_async"
                    .to_string(),
            ));
        }
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;
        rt.block_on(self.execute_async(command))
    }

    /// Execute a CLI command via the single route table, returning its output.
    pub async fn execute_async(&self, command: &Commands) -> Result<String, ApiError> {
        let span = tracing::info_span!("command", name = %command_name(command));
        async {
            let mut out = Vec::new();
            match command {
                Commands::Get { command } => self.handle_get_command(command, &mut out).await?,
                Commands::Add { command } => self.handle_add_command(command, &mut out).await?,
            }
            info!("Command completed");
            String::from_utf8(out).map_err(|e| {
                ApiError::Output(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            })
        }
        .instrument(span)
        .await
    }

    async fn handle_get_command(
        &self,
        command: &GetCommands,
        out: &mut dyn Write,
    ) -> Result<(), ApiError> {
        match command {
            GetCommands::Template {
                name,
                list_parameters,
                provider,
                format,
            } => {
                let format: OutputFormat = format.parse()?;
                match (name.as_deref(), *list_parameters, provider.as_deref()) {
                    (Some(name), true, _) => {
                        capi::get_template_parameters(name, &self.client, out, format).await
                    }
                    (None, true, _) => Err(ApiError::InvalidArgument(
                        "--list-parameters requires a template name".to_string(),
                    )),
                    (None, false, Some(provider)) if !provider.is_empty() => {
                        capi::get_templates_by_provider(provider, &self.client, out, format).await
                    }
                    (None, false, _) => capi::get_templates(&self.client, out, format).await,
                    // A bare template name lists nothing.
                    (Some(_), false, _) => Ok(()),
                }
            }
            GetCommands::Credential { format } => {
                let format: OutputFormat = format.parse()?;
                capi::get_credentials(&self.client, out, format).await
            }
        }
    }

    async fn handle_add_command(
        &self,
        command: &AddCommands,
        out: &mut dyn Write,
    ) -> Result<(), ApiError> {
        match command {
            AddCommands::Cluster {
                from_template,
                set,
                set_credentials,
                dry_run,
                url,
                branch,
                base,
                title,
                description,
                commit_message,
            } => {
                let parameter_values = parse_parameter_values(set)?;
                let credentials = match set_credentials.as_deref() {
                    Some(name) => Some(self.resolve_credentials(name).await?),
                    None => None,
                };

                if *dry_run {
                    return capi::render_template_with_parameters(
                        from_template,
                        &parameter_values,
                        credentials.as_ref(),
                        &self.client,
                        out,
                    )
                    .await;
                }

                let repository_url = required_flag(url.as_deref(), "--url")?;
                let head_branch = required_flag(branch.as_deref(), "--branch")?;
                let params = CreatePullRequestParams {
                    template_name: from_template.clone(),
                    parameter_values,
                    repository_url,
                    head_branch,
                    base_branch: base.clone(),
                    title: title.clone(),
                    description: description.clone(),
                    commit_message: commit_message.clone(),
                    credentials,
                };
                capi::create_pull_request_from_template(&params, &self.client, out).await
            }
        }
    }

    async fn resolve_credentials(&self, name: &str) -> Result<Credential, ApiError> {
        let credentials = self.client.retrieve_credentials().await.map_err(|source| {
            ApiError::RetrieveCredentials {
                origin: CredentialsRetriever::source(&self.client),
                source,
            }
        })?;
        credentials
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ApiError::InvalidArgument(format!("credential {:?} not found", name)))
    }
}

fn required_flag(value: Option<&str>, flag: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::InvalidArgument(format!(
            "{} is required unless --dry-run is set",
            flag
        ))),
    }
}

/// Parse repeated `KEY=VALUE` flags into parameter values. Later keys win.
pub fn parse_parameter_values(values: &[String]) -> Result<BTreeMap<String, String>, ApiError> {
    let mut parsed = BTreeMap::new();
    for entry in values {
        let (key, value) = entry.split_once('=').ok_or_else(|| {
            ApiError::InvalidArgument(format!(
                "invalid parameter {:?}: expected KEY=VALUE",
                entry
            ))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ApiError::InvalidArgument(format!(
                "invalid parameter {:?}: key is empty",
                entry
            )));
        }
        parsed.insert(key.to_string(), value.to_string());
    }
    Ok(parsed)
}
