//! Development proxy relay.
//!
//! Serves `GET <prefix>/<rest>?<query>` by fetching `<upstream>/<rest>?<query>`
//! and returning the upstream status and body unchanged. Browser pages served
//! from the same origin can then reach an API that does not send CORS
//! headers. This is the local end of a `ProxyRewrite` rule whose replacement
//! points here.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use url::Url;

use crate::error::{RelayError, RelaySettingsError};

/// Request headers copied to the upstream request.
const FORWARDED_HEADERS: [HeaderName; 3] = [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];

#[derive(Debug, Clone)]
pub struct RelaySettings {
    upstream: String,
    prefix: String,
}

impl RelaySettings {
    /// The upstream must be a bare origin or base path: the query of each
    /// relayed request is appended to it.
    pub fn new(upstream: &str, prefix: &str) -> Result<Self, RelaySettingsError> {
        let upstream = Url::parse(upstream)?;
        if upstream.query().is_some() || upstream.fragment().is_some() {
            return Err(RelaySettingsError::UpstreamHasQuery(upstream.to_string()));
        }
        let prefix = prefix.trim().trim_end_matches('/');
        let prefix = if prefix.is_empty() || prefix.starts_with('/') {
            prefix.to_string()
        } else {
            format!("/{prefix}")
        };
        Ok(Self {
            upstream: upstream.as_str().trim_end_matches('/').to_string(),
            prefix,
        })
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Upstream URL for a local request URI, or `None` outside the prefix.
    pub fn target(&self, uri: &Uri) -> Option<String> {
        let rest = uri.path().strip_prefix(self.prefix.as_str())?;
        let rest = match rest {
            "" => "/",
            r if r.starts_with('/') => r,
            _ => return None,
        };
        Some(match uri.query() {
            Some(query) => format!("{}{rest}?{query}", self.upstream),
            None => format!("{}{rest}", self.upstream),
        })
    }
}

struct Relay {
    settings: RelaySettings,
    http: reqwest::Client,
}

/// Build the relay. `timeout` bounds each upstream round-trip; a slow
/// upstream is answered with 502 `TIMEOUT`.
pub fn router(settings: RelaySettings, timeout: Duration) -> Result<Router, reqwest::Error> {
    let http = reqwest::Client::builder().timeout(timeout).build()?;
    let relay = Arc::new(Relay { settings, http });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Ok(Router::new()
        .fallback(forward)
        .with_state(relay)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

async fn forward(
    State(relay): State<Arc<Relay>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, RelayError> {
    if method != Method::GET {
        return Err(RelayError::MethodNotAllowed(method));
    }
    let target = relay
        .settings
        .target(&uri)
        .ok_or_else(|| RelayError::OutsidePrefix(uri.path().to_string()))?;

    tracing::debug!(%target, "relaying request");

    let mut request = relay.http.get(&target);
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(&name) {
            request = request.header(name, value.clone());
        }
    }

    let upstream = request.send().await.map_err(|e| {
        tracing::warn!(%target, error = %e, "upstream unreachable");
        RelayError::from(e)
    })?;

    let status = upstream.status();
    let mut response_headers = HeaderMap::new();
    if let Some(content_type) = upstream.headers().get(header::CONTENT_TYPE) {
        response_headers.insert(header::CONTENT_TYPE, content_type.clone());
    }
    if let Some(challenge) = upstream.headers().get(header::WWW_AUTHENTICATE) {
        response_headers.insert(header::WWW_AUTHENTICATE, challenge.clone());
    }
    let body = upstream.bytes().await?;

    tracing::debug!(status = status.as_u16(), "relayed response");
    Ok((status, response_headers, body).into_response())
}
