//! Request builder and response classifier for authenticated JSON endpoints.
//!
//! # Overview
//! Builds `HttpRequest` values and classifies `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `FetchClient` is stateless between calls. It holds only the optional
//!   proxy rewrite rule and the credential policy.
//! - A fetch is split into `build_fetch` (produces request) and `classify`
//!   (consumes response), so the I/O boundary is explicit.
//! - Response-side failures are values (`ResponseOutcome::Failure`), never
//!   errors. `ApiError` only covers inputs the builder cannot accept.
//! - `FormState` models the form as an explicit value moved through pure
//!   transitions, which is what keeps one request in flight at a time.

pub mod client;
pub mod credentials;
pub mod curl;
pub mod error;
pub mod http;
pub mod outcome;
pub mod rewrite;
pub mod state;

pub use client::FetchClient;
pub use credentials::{CredentialPolicy, Credentials};
pub use curl::to_curl;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use outcome::{Failure, FailureCategory, ResponseOutcome};
pub use rewrite::ProxyRewrite;
pub use state::{FetchPhase, FormState, Transition};
