//! Stateless request builder and response classifier.
//!
//! # Design
//! `FetchClient` holds only deployment settings (proxy rewrite rules and
//! the credential policy) and carries no mutable state between calls.
//! A fetch is split into `build_fetch`, which produces an `HttpRequest`, and
//! `classify`, which consumes an `HttpResponse`. The caller executes the
//! actual HTTP round-trip in between.

use std::fmt::Display;

use crate::credentials::{CredentialPolicy, Credentials};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::outcome::{Failure, FailureCategory, ResponseOutcome};
use crate::rewrite::ProxyRewrite;

/// Header names are emitted lowercase; the upstream API requires the exact
/// spelling `authorization`.
pub const AUTHORIZATION: &str = "authorization";
pub const CONTENT_TYPE: &str = "content-type";

/// Synchronous, stateless client for authenticated JSON endpoints.
#[derive(Debug, Clone, Default)]
pub struct FetchClient {
    rewrites: Vec<ProxyRewrite>,
    credential_policy: CredentialPolicy,
}

impl FetchClient {
    /// A client with no rewrite rules and the lenient credential policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rewrite rule. Rules are tried in the order they were added and
    /// the first match wins.
    pub fn with_rewrite(mut self, rewrite: ProxyRewrite) -> Self {
        self.rewrites.push(rewrite);
        self
    }

    pub fn with_credential_policy(mut self, policy: CredentialPolicy) -> Self {
        self.credential_policy = policy;
        self
    }

    pub fn build_fetch(
        &self,
        raw_url: &str,
        credentials: Option<&Credentials>,
    ) -> Result<HttpRequest, ApiError> {
        let raw_url = raw_url.trim();
        if raw_url.is_empty() {
            return Err(ApiError::BlankUrl);
        }

        let url = self
            .rewrites
            .iter()
            .find_map(|rule| rule.rewrite(raw_url))
            .unwrap_or_else(|| raw_url.to_string());
        if url != raw_url {
            tracing::debug!(from = raw_url, to = %url, "rewrote request through development proxy");
        }

        let mut headers = vec![(CONTENT_TYPE.to_string(), "application/json".to_string())];
        if let Some(creds) = credentials {
            headers.push((AUTHORIZATION.to_string(), creds.basic_authorization()));
        }

        Ok(HttpRequest {
            method: HttpMethod::Get,
            url,
            headers,
        })
    }

    /// Build from raw form fields, resolving credentials under this client's
    /// policy first.
    pub fn build_from_form(&self, url: &str, name: &str, secret: &str) -> Result<HttpRequest, ApiError> {
        let credentials = Credentials::from_form(name, secret, self.credential_policy)?;
        self.build_fetch(url, credentials.as_ref())
    }

    pub fn classify(&self, response: &HttpResponse) -> ResponseOutcome {
        let status = response.status;
        if (200..=299).contains(&status) {
            return match serde_json::from_slice(&response.body) {
                Ok(value) => ResponseOutcome::Success(value),
                Err(e) => ResponseOutcome::Failure(Failure::new(
                    FailureCategory::MalformedResponse,
                    Some(status),
                    format!("response body is not valid JSON: {e}"),
                )),
            };
        }

        let category = match status {
            404 => FailureCategory::NotFound,
            401 | 403 => FailureCategory::Unauthorized,
            _ => FailureCategory::HttpError,
        };
        let message = match response.status_text.trim() {
            "" => format!("HTTP {status}"),
            text => format!("HTTP {status}: {text}"),
        };
        ResponseOutcome::Failure(Failure::new(category, Some(status), message))
    }

    /// Outcome for a request that never produced a status line (DNS, refused
    /// connection, timeout, blocked by the host).
    pub fn classify_transport_error(&self, error: impl Display) -> ResponseOutcome {
        ResponseOutcome::Failure(Failure::new(
            FailureCategory::NetworkError,
            None,
            error.to_string(),
        ))
    }
}
