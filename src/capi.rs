//! CAPI Templates and Credentials
//!
//! Records describing Cluster API templates, their parameters and the
//! provider credentials a cluster can be created with, plus the capabilities
//! a catalog backend implements to serve them. Console rendering lives in
//! [`report`] and depends only on these capabilities, never on a concrete
//! adapter.

use crate::error::AdapterError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod format;
pub mod report;

pub use format::OutputFormat;
pub use report::{
    create_pull_request_from_template, get_credentials, get_template_parameters, get_templates,
    get_templates_by_provider, render_template_with_parameters,
};

/// Suffix every CAPI infrastructure cluster kind carries (`AWSCluster`, `AzureCluster`, ...).
const CLUSTER_KIND_MARKER: &str = "Cluster";

/// A cluster-provisioning template published by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub provider: String,
}

/// A named input declared by a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParameter {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    /// Enumerated values the parameter is restricted to, when the template declares any.
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

/// Reference to a provider-specific identity object in the management cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub name: String,
    pub namespace: String,
    /// Infrastructure provider, resolved when the record is built.
    pub provider: String,
}

impl Credential {
    /// Build a credential, resolving its infrastructure provider from `kind`.
    ///
    /// Fails with [`AdapterError::InvalidCredentialKind`] when `kind` does not
    /// contain `Cluster`.
    pub fn from_kind(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Result<Self, AdapterError> {
        let kind = kind.into();
        let provider = infrastructure_provider(&kind)?.to_string();
        Ok(Self {
            group: group.into(),
            version: version.into(),
            kind,
            name: name.into(),
            namespace: namespace.into(),
            provider,
        })
    }
}

/// Extract the infrastructure provider from a cluster kind: `AWSCluster` -> `AWS`.
pub fn infrastructure_provider(kind: &str) -> Result<&str, AdapterError> {
    kind.find(CLUSTER_KIND_MARKER)
        .map(|idx| &kind[..idx])
        .ok_or_else(|| AdapterError::InvalidCredentialKind(kind.to_string()))
}

/// Everything needed to open a pull request that adds a cluster from a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePullRequestParams {
    pub template_name: String,
    pub parameter_values: BTreeMap<String, String>,
    pub repository_url: String,
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
    pub description: String,
    pub commit_message: String,
    pub credentials: Option<Credential>,
}

/// Backend that lists templates and their parameters.
#[async_trait]
pub trait TemplatesRetriever: Send + Sync {
    /// Label identifying this backend in error messages.
    fn source(&self) -> String;

    async fn retrieve_templates(&self) -> Result<Vec<Template>, AdapterError>;

    async fn retrieve_templates_by_provider(
        &self,
        provider: &str,
    ) -> Result<Vec<Template>, AdapterError>;

    async fn retrieve_template_parameters(
        &self,
        name: &str,
    ) -> Result<Vec<TemplateParameter>, AdapterError>;
}

/// Backend that lists provider credentials.
#[async_trait]
pub trait CredentialsRetriever: Send + Sync {
    /// Label identifying this backend in error messages.
    fn source(&self) -> String;

    async fn retrieve_credentials(&self) -> Result<Vec<Credential>, AdapterError>;
}

/// Backend that renders a template populated with parameter values.
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    async fn render_template_with_parameters(
        &self,
        name: &str,
        parameters: &BTreeMap<String, String>,
        credentials: Option<&Credential>,
    ) -> Result<String, AdapterError>;
}

/// Backend that opens a pull request from a template. Returns the web URL of the pull request.
#[async_trait]
pub trait TemplatePullRequester: Send + Sync {
    async fn create_pull_request_from_template(
        &self,
        params: &CreatePullRequestParams,
    ) -> Result<String, AdapterError>;
}
