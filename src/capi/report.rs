//! Console reporting over the catalog capabilities.
//!
//! Each operation performs a single upstream call and only writes once it
//! succeeded; a failed fetch leaves the sink untouched.

use crate::capi::format::{write_rows, OutputFormat};
use crate::capi::{
    CreatePullRequestParams, Credential, CredentialsRetriever, TemplatePullRequester,
    TemplateRenderer, TemplatesRetriever,
};
use crate::error::ApiError;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::debug;

/// Show every template the retriever knows about.
pub async fn get_templates(
    r: &dyn TemplatesRetriever,
    w: &mut dyn Write,
    format: OutputFormat,
) -> Result<(), ApiError> {
    let templates = r
        .retrieve_templates()
        .await
        .map_err(|source| ApiError::RetrieveTemplates {
            origin: r.source(),
            source,
        })?;
    debug!(source = %r.source(), count = templates.len(), "Retrieved templates");

    write_rows(w, &templates, format, "No templates found.")
}

/// Show the templates published for `provider`.
pub async fn get_templates_by_provider(
    provider: &str,
    r: &dyn TemplatesRetriever,
    w: &mut dyn Write,
    format: OutputFormat,
) -> Result<(), ApiError> {
    let templates = r
        .retrieve_templates_by_provider(provider)
        .await
        .map_err(|source| ApiError::RetrieveTemplates {
            origin: r.source(),
            source,
        })?;
    debug!(
        source = %r.source(),
        provider,
        count = templates.len(),
        "Retrieved templates by provider"
    );

    let empty = format!("No templates were found for provider {:?}.", provider);
    write_rows(w, &templates, format, &empty)
}

/// Show the parameters declared by template `name`.
pub async fn get_template_parameters(
    name: &str,
    r: &dyn TemplatesRetriever,
    w: &mut dyn Write,
    format: OutputFormat,
) -> Result<(), ApiError> {
    let parameters = r.retrieve_template_parameters(name).await.map_err(|source| {
        ApiError::RetrieveTemplateParameters {
            name: name.to_string(),
            origin: r.source(),
            source,
        }
    })?;
    debug!(
        source = %r.source(),
        template = name,
        count = parameters.len(),
        "Retrieved template parameters"
    );

    let empty = format!("No template parameters were found for template {:?}.", name);
    write_rows(w, &parameters, format, &empty)
}

/// Show the provider credentials available for new clusters.
pub async fn get_credentials(
    r: &dyn CredentialsRetriever,
    w: &mut dyn Write,
    format: OutputFormat,
) -> Result<(), ApiError> {
    let credentials = r
        .retrieve_credentials()
        .await
        .map_err(|source| ApiError::RetrieveCredentials {
            origin: r.source(),
            source,
        })?;
    debug!(source = %r.source(), count = credentials.len(), "Retrieved credentials");

    write_rows(w, &credentials, format, "No credentials found.")
}

/// Show template `name` rendered with `parameters`.
pub async fn render_template_with_parameters(
    name: &str,
    parameters: &BTreeMap<String, String>,
    credentials: Option<&Credential>,
    r: &dyn TemplateRenderer,
    w: &mut dyn Write,
) -> Result<(), ApiError> {
    let rendered = r
        .render_template_with_parameters(name, parameters, credentials)
        .await
        .map_err(|source| ApiError::RenderTemplate {
            name: name.to_string(),
            source,
        })?;

    if rendered.is_empty() {
        writeln!(w, "No template found.")?;
    } else {
        write!(w, "{}", rendered)?;
        if !rendered.ends_with('\n') {
            writeln!(w)?;
        }
    }
    Ok(())
}

/// Open a pull request adding a cluster from a template and show its URL.
pub async fn create_pull_request_from_template(
    params: &CreatePullRequestParams,
    r: &dyn TemplatePullRequester,
    w: &mut dyn Write,
) -> Result<(), ApiError> {
    let url = r
        .create_pull_request_from_template(params)
        .await
        .map_err(|source| ApiError::CreatePullRequest { source })?;
    debug!(template = %params.template_name, url = %url, "Created pull request");

    writeln!(w, "Created pull request: {}", url)?;
    Ok(())
}
