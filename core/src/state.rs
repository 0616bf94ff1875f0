//! Form state and the per-fetch lifecycle.
//!
//! The state is a plain value: transitions take it by value and hand back
//! the next one, so the builder and classifier stay testable on their own.
//!
//! ```text
//! Idle ──begin──> Fetching ──complete──> Succeeded | Failed
//!   ^                                        │
//!   └──────────────── begin ─────────────────┘
//! ```
//!
//! `begin_fetch` while `Fetching` is a no-op, which is what keeps a single
//! request in flight per form.

use std::fmt;

use crate::client::FetchClient;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::outcome::ResponseOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Fetching,
    Succeeded,
    Failed,
}

/// What `begin_fetch` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A request was built; the host should execute it and call `complete`.
    Started(HttpRequest),
    /// A request is already in flight. Nothing was built.
    Busy,
    /// The inputs could not be turned into a request. State is unchanged.
    Invalid(ApiError),
}

#[derive(Clone, Default)]
pub struct FormState {
    pub url: String,
    pub name: String,
    pub secret: String,
    phase: FetchPhase,
    request: Option<HttpRequest>,
    outcome: Option<ResponseOutcome>,
}

impl FormState {
    pub fn new(url: &str, name: &str, secret: &str) -> Self {
        Self {
            url: url.to_string(),
            name: name.to_string(),
            secret: secret.to_string(),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Whether the fetch trigger is enabled.
    pub fn can_fetch(&self) -> bool {
        self.phase != FetchPhase::Fetching
    }

    /// Descriptor of the current or last request, for curl rendering.
    pub fn request(&self) -> Option<&HttpRequest> {
        self.request.as_ref()
    }

    pub fn outcome(&self) -> Option<&ResponseOutcome> {
        self.outcome.as_ref()
    }

    pub fn begin_fetch(self, client: &FetchClient) -> (FormState, Transition) {
        if self.phase == FetchPhase::Fetching {
            tracing::debug!("fetch already in flight, trigger ignored");
            return (self, Transition::Busy);
        }
        let request = match client.build_from_form(&self.url, &self.name, &self.secret) {
            Ok(request) => request,
            Err(e) => return (self, Transition::Invalid(e)),
        };
        let next = FormState {
            phase: FetchPhase::Fetching,
            request: Some(request.clone()),
            outcome: None,
            ..self
        };
        (next, Transition::Started(request))
    }

    /// Record the outcome of the in-flight request. Ignored unless `Fetching`.
    pub fn complete(self, outcome: ResponseOutcome) -> FormState {
        if self.phase != FetchPhase::Fetching {
            tracing::debug!(phase = ?self.phase, "stale completion ignored");
            return self;
        }
        let phase = if outcome.is_success() {
            FetchPhase::Succeeded
        } else {
            FetchPhase::Failed
        };
        FormState {
            phase,
            outcome: Some(outcome),
            ..self
        }
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("url", &self.url)
            .field("name", &self.name)
            .field("phase", &self.phase)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
