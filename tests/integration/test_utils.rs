//! Shared test utilities for integration tests
//!
//! Centralized setup/teardown for the config environment and the fake
//! template catalog used by the CLI tests.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use gitops::cli::RunContext;
use gitops::config::GitopsConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_VARS: &[&str] = &["HOME", "XDG_CONFIG_HOME", "GITOPS_ENDPOINT"];

/// Environment variable state to restore after test
struct EnvState {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            saved: ENV_VARS
                .iter()
                .map(|k| (*k, std::env::var(k).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (k, v) in self.saved {
            match v {
                Some(orig) => std::env::set_var(k, orig),
                None => std::env::remove_var(k),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointing into `test_dir` and no GITOPS_ENDPOINT.
///
/// The global config file, if a test writes one, lives at `<test_dir>/gitops/config.toml`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());
    std::env::remove_var("GITOPS_ENDPOINT");

    let result = f();

    env_state.restore();

    result
}

/// Canned catalog content served by [`FakeCatalog`].
#[derive(Clone, Default)]
pub struct CatalogState {
    pub templates: Vec<Value>,
    /// Parameters per template name; templates missing here answer 404.
    pub parameters: HashMap<String, Vec<Value>>,
    pub credentials: Vec<Value>,
    /// When set, every route answers with this status and message.
    pub fail_with: Option<(u16, String)>,
    /// Bodies of POST requests, in arrival order.
    pub posted: Arc<Mutex<Vec<Value>>>,
}

type HandlerResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn failure(state: &CatalogState) -> Option<(StatusCode, Json<Value>)> {
    state.fail_with.as_ref().map(|(status, message)| {
        (
            StatusCode::from_u16(*status).unwrap(),
            Json(json!({ "code": status, "message": message })),
        )
    })
}

async fn list_templates(
    State(state): State<CatalogState>,
    Query(query): Query<HashMap<String, String>>,
) -> HandlerResult {
    if let Some(err) = failure(&state) {
        return Err(err);
    }
    let templates: Vec<Value> = match query.get("provider") {
        Some(provider) => state
            .templates
            .iter()
            .filter(|t| t["provider"].as_str() == Some(provider.as_str()))
            .cloned()
            .collect(),
        None => state.templates.clone(),
    };
    let total = templates.len();
    Ok(Json(json!({ "templates": templates, "total": total })))
}

async fn template_params(
    State(state): State<CatalogState>,
    Path(name): Path<String>,
) -> HandlerResult {
    if let Some(err) = failure(&state) {
        return Err(err);
    }
    match state.parameters.get(&name) {
        Some(parameters) => Ok(Json(json!({ "parameters": parameters, "objects": [] }))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "code": 5, "message": format!("cannot find template {}", name) })),
        )),
    }
}

async fn render_template(
    State(state): State<CatalogState>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> HandlerResult {
    if let Some(err) = failure(&state) {
        return Err(err);
    }
    state.posted.lock().unwrap().push(body.clone());
    let cluster_name = body["values"]["CLUSTER_NAME"].as_str().unwrap_or("");
    Ok(Json(json!({
        "renderedTemplate": format!(
            "# template: {}\nkind: Cluster\nmetadata:\n  name: {}\n",
            name, cluster_name
        )
    })))
}

async fn list_credentials(State(state): State<CatalogState>) -> HandlerResult {
    if let Some(err) = failure(&state) {
        return Err(err);
    }
    let total = state.credentials.len();
    Ok(Json(json!({ "credentials": state.credentials, "total": total })))
}

async fn create_pull_request(
    State(state): State<CatalogState>,
    Json(body): Json<Value>,
) -> HandlerResult {
    if let Some(err) = failure(&state) {
        return Err(err);
    }
    state.posted.lock().unwrap().push(body);
    Ok(Json(
        json!({ "webUrl": "https://github.com/org/fleet/pull/1" }),
    ))
}

/// Template catalog served on an ephemeral local port for the lifetime of the test runtime.
pub struct FakeCatalog {
    pub endpoint: String,
    pub posted: Arc<Mutex<Vec<Value>>>,
}

impl FakeCatalog {
    pub async fn start(state: CatalogState) -> Self {
        let posted = Arc::clone(&state.posted);
        let router = Router::new()
            .route("/v1/templates", get(list_templates))
            .route("/v1/templates/{name}/params", get(template_params))
            .route("/v1/templates/{name}/render", post(render_template))
            .route("/v1/credentials", get(list_credentials))
            .route("/v1/clusters", post(create_pull_request))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            endpoint: format!("http://{}", addr),
            posted,
        }
    }

    /// Run context pointed at this catalog, independent of any config on disk.
    pub fn context(&self) -> RunContext {
        RunContext::from_config(GitopsConfig::default(), Some(self.endpoint.clone())).unwrap()
    }

    pub fn posted(&self) -> Vec<Value> {
        self.posted.lock().unwrap().clone()
    }
}

pub fn template(name: &str, provider: &str, description: &str) -> Value {
    json!({
        "name": name,
        "provider": provider,
        "description": description,
        "body": "a3VtYQ==",
    })
}

pub fn credential(name: &str, kind: &str) -> Value {
    json!({
        "group": "infrastructure.cluster.x-k8s.io",
        "version": "v1alpha4",
        "kind": kind,
        "name": name,
        "namespace": "default",
    })
}

/// An endpoint nothing is listening on.
pub async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
