//! Error types for the request builder.
//!
//! # Design
//! Only inputs the builder refuses to turn into a request land here. Anything
//! that happens after a request is issued (bad status, unparseable body,
//! transport failure) is a `ResponseOutcome::Failure`, because the caller
//! always has to render something for it.

use thiserror::Error;

/// Errors returned by `FetchClient` build methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The endpoint URL was empty or whitespace only.
    #[error("endpoint URL must not be blank")]
    BlankUrl,

    /// Exactly one of name/secret was filled in under `CredentialPolicy::Strict`.
    #[error("both the service-account name and secret are required when either is given")]
    PartialCredentials,

    /// A proxy rewrite rule could not be constructed.
    #[error("invalid rewrite rule: {0}")]
    InvalidRewrite(String),
}
