//! Error types for the GitOps CLI.

use thiserror::Error;

/// Adapter-level errors: what a retrieval backend reports before any command context is added.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("response status for {method} {url:?} was {status}: {message}")]
    UnexpectedStatus {
        method: &'static str,
        url: String,
        status: u16,
        message: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("credential kind {0:?} does not name an infrastructure provider (expected <Provider>Cluster)")]
    InvalidCredentialKind(String),
}

/// Command-level errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unable to retrieve templates from {origin:?}: {source}")]
    RetrieveTemplates {
        origin: String,
        #[source]
        source: AdapterError,
    },

    #[error("unable to retrieve parameters for template {name:?} from {origin:?}: {source}")]
    RetrieveTemplateParameters {
        name: String,
        origin: String,
        #[source]
        source: AdapterError,
    },

    #[error("unable to retrieve credentials from {origin:?}: {source}")]
    RetrieveCredentials {
        origin: String,
        #[source]
        source: AdapterError,
    },

    #[error("unable to render template {name:?}: {source}")]
    RenderTemplate {
        name: String,
        #[source]
        source: AdapterError,
    },

    #[error("unable to create pull request: {source}")]
    CreatePullRequest {
        #[source]
        source: AdapterError,
    },

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
