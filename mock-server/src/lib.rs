use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const DEFAULT_NAME: &str = "svc-reader";
pub const DEFAULT_SECRET: &str = "s3cret";

/// Accounts and data served by the mock workspace API.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub name: String,
    pub secret: String,
    /// Schema documents keyed by (workspace, branch).
    pub schemas: HashMap<(String, String), Value>,
    /// Workspaces that exist but the service account may not read.
    pub forbidden_workspaces: Vec<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        let mut schemas = HashMap::new();
        schemas.insert(("acme".to_string(), "main".to_string()), sample_schema());
        Self {
            name: DEFAULT_NAME.to_string(),
            secret: DEFAULT_SECRET.to_string(),
            schemas,
            forbidden_workspaces: vec!["locked".to_string()],
        }
    }
}

/// Schema returned for `acme/main`. Key order is deliberate.
pub fn sample_schema() -> Value {
    json!({
        "version": 3,
        "tables": [
            {"name": "users", "columns": [{"name": "id", "type": "int"}, {"name": "email", "type": "string"}]},
            {"name": "orders", "columns": [{"name": "id", "type": "int"}, {"name": "user_id", "type": "int"}]}
        ],
        "branch": "main"
    })
}

type Shared = Arc<MockConfig>;

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    Router::new()
        .route("/v1/workspaces/{workspace}/branches/{branch}/schema", get(get_schema))
        .route("/v1/broken", get(broken))
        .route("/v1/echo", get(echo))
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn authorized(config: &MockConfig, headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let Some((scheme, token)) = value.split_once(' ') else {
        return false;
    };
    if !scheme.eq_ignore_ascii_case("basic") {
        return false;
    }
    let Ok(decoded) = STANDARD.decode(token.trim()) else {
        return false;
    };
    decoded == format!("{}:{}", config.name, config.secret).into_bytes()
}

async fn get_schema(
    State(config): State<Shared>,
    Path((workspace, branch)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&config, &headers) {
        return (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"schema\"")],
        )
            .into_response();
    }
    if config.forbidden_workspaces.contains(&workspace) {
        return StatusCode::FORBIDDEN.into_response();
    }
    match config.schemas.get(&(workspace, branch)) {
        Some(schema) => Json(schema.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn broken() -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], "not json")
}

/// Reports what arrived, so relays can be checked for header and query
/// forwarding.
async fn echo(headers: HeaderMap, RawQuery(query): RawQuery) -> Json<Value> {
    let text = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    Json(json!({
        "authorization": text(header::AUTHORIZATION),
        "content_type": text(header::CONTENT_TYPE),
        "query": query,
    }))
}
