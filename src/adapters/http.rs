//! HTTP adapter for the template catalog REST API.

use crate::capi::{
    CreatePullRequestParams, Credential, CredentialsRetriever, Template, TemplateParameter,
    TemplatePullRequester, TemplateRenderer, TemplatesRetriever,
};
use crate::config::HttpConfig;
use crate::error::AdapterError;
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

const TEMPLATES_PATH: &[&str] = &["v1", "templates"];
const CREDENTIALS_PATH: &[&str] = &["v1", "credentials"];
const CLUSTERS_PATH: &[&str] = &["v1", "clusters"];

#[derive(Deserialize)]
struct TemplatesResponse {
    #[serde(default)]
    templates: Vec<Template>,
}

#[derive(Deserialize)]
struct TemplateParametersResponse {
    #[serde(default)]
    parameters: Vec<TemplateParameter>,
}

#[derive(Deserialize)]
struct CredentialsResponse {
    #[serde(default)]
    credentials: Vec<CredentialView>,
}

/// Credential as it travels on the wire: no provider, only the kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CredentialView {
    #[serde(default)]
    group: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    namespace: String,
}

impl From<&Credential> for CredentialView {
    fn from(c: &Credential) -> Self {
        Self {
            group: c.group.clone(),
            version: c.version.clone(),
            kind: c.kind.clone(),
            name: c.name.clone(),
            namespace: c.namespace.clone(),
        }
    }
}

impl TryFrom<CredentialView> for Credential {
    type Error = AdapterError;

    fn try_from(view: CredentialView) -> Result<Self, Self::Error> {
        Credential::from_kind(view.group, view.version, view.kind, view.name, view.namespace)
    }
}

#[derive(Serialize)]
struct RenderTemplateRequest<'a> {
    values: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credentials: Option<CredentialView>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderTemplateResponse {
    #[serde(default)]
    rendered_template: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePullRequestRequest<'a> {
    repository_url: &'a str,
    head_branch: &'a str,
    base_branch: &'a str,
    title: &'a str,
    description: &'a str,
    template_name: &'a str,
    #[serde(rename = "parameter_values")]
    parameter_values: &'a BTreeMap<String, String>,
    commit_message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    credentials: Option<CredentialView>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePullRequestResponse {
    web_url: String,
}

#[derive(Deserialize)]
struct ServiceError {
    #[serde(default)]
    message: Option<String>,
}

fn map_http_error(error: reqwest::Error) -> AdapterError {
    if error.is_timeout() {
        AdapterError::Request(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        AdapterError::Request(format!("Connection error: {}", error))
    } else {
        AdapterError::Request(format!("HTTP error: {}", error))
    }
}

/// Catalog client speaking the Weave GitOps Enterprise REST API.
pub struct HttpClient {
    client: Client,
    base_url: Url,
    endpoint: String,
}

impl HttpClient {
    /// Create a client for `endpoint`, which must be an absolute http(s) URL.
    pub fn new(endpoint: &str, config: &HttpConfig) -> Result<Self, AdapterError> {
        let invalid = |reason: String| AdapterError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason,
        };

        let base_url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(invalid(format!(
                "unsupported scheme '{}' (must be http or https)",
                base_url.scheme()
            )));
        }
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AdapterError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            endpoint: endpoint.to_string(),
        })
    }

    /// Endpoint this client was created for.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, segments: &[&str]) -> Result<Url, AdapterError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AdapterError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AdapterError> {
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(map_http_error)?;
        decode_response("GET", &url, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, AdapterError> {
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(url.clone())
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(map_http_error)?;
        decode_response("POST", &url, response).await
    }
}

async fn decode_response<T: DeserializeOwned>(
    method: &'static str,
    url: &Url,
    response: Response,
) -> Result<T, AdapterError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ServiceError>(&body)
            .ok()
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().to_string());
        warn!(method, url = %url, status = status.as_u16(), message = %message, "Catalog request failed");
        return Err(AdapterError::UnexpectedStatus {
            method,
            url: url.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AdapterError::Decode(e.to_string()))
}

#[async_trait]
impl TemplatesRetriever for HttpClient {
    fn source(&self) -> String {
        self.endpoint.clone()
    }

    async fn retrieve_templates(&self) -> Result<Vec<Template>, AdapterError> {
        let url = self.url(TEMPLATES_PATH)?;
        let response: TemplatesResponse = self.get_json(url).await?;
        Ok(response.templates)
    }

    async fn retrieve_templates_by_provider(
        &self,
        provider: &str,
    ) -> Result<Vec<Template>, AdapterError> {
        let mut url = self.url(TEMPLATES_PATH)?;
        url.query_pairs_mut().append_pair("provider", provider);
        let response: TemplatesResponse = self.get_json(url).await?;
        Ok(response.templates)
    }

    async fn retrieve_template_parameters(
        &self,
        name: &str,
    ) -> Result<Vec<TemplateParameter>, AdapterError> {
        let url = self.url(&["v1", "templates", name, "params"])?;
        let response: TemplateParametersResponse = self.get_json(url).await?;
        Ok(response.parameters)
    }
}

#[async_trait]
impl CredentialsRetriever for HttpClient {
    fn source(&self) -> String {
        self.endpoint.clone()
    }

    async fn retrieve_credentials(&self) -> Result<Vec<Credential>, AdapterError> {
        let url = self.url(CREDENTIALS_PATH)?;
        let response: CredentialsResponse = self.get_json(url).await?;
        response
            .credentials
            .into_iter()
            .map(Credential::try_from)
            .collect()
    }
}

#[async_trait]
impl TemplateRenderer for HttpClient {
    async fn render_template_with_parameters(
        &self,
        name: &str,
        parameters: &BTreeMap<String, String>,
        credentials: Option<&Credential>,
    ) -> Result<String, AdapterError> {
        let url = self.url(&["v1", "templates", name, "render"])?;
        let request = RenderTemplateRequest {
            values: parameters,
            credentials: credentials.map(CredentialView::from),
        };
        let response: RenderTemplateResponse = self.post_json(url, &request).await?;
        Ok(response.rendered_template)
    }
}

#[async_trait]
impl TemplatePullRequester for HttpClient {
    async fn create_pull_request_from_template(
        &self,
        params: &CreatePullRequestParams,
    ) -> Result<String, AdapterError> {
        let url = self.url(CLUSTERS_PATH)?;
        let request = CreatePullRequestRequest {
            repository_url: &params.repository_url,
            head_branch: &params.head_branch,
            base_branch: &params.base_branch,
            title: &params.title,
            description: &params.description,
            template_name: &params.template_name,
            parameter_values: &params.parameter_values,
            commit_message: &params.commit_message,
            credentials: params.credentials.as_ref().map(CredentialView::from),
        };
        let response: CreatePullRequestResponse = self.post_json(url, &request).await?;
        Ok(response.web_url)
    }
}
