//! Text output for a finished fetch.

use fetch_core::{Failure, ResponseOutcome};

/// Pretty-printed payload on success, message plus hint on failure.
pub fn render_outcome(outcome: &ResponseOutcome) -> Result<String, serde_json::Error> {
    match outcome {
        ResponseOutcome::Success(value) => serde_json::to_string_pretty(value),
        ResponseOutcome::Failure(failure) => Ok(render_failure(failure)),
    }
}

pub fn render_failure(failure: &Failure) -> String {
    match &failure.remediation {
        Some(hint) => format!("error: {}\nhint: {hint}", failure.message),
        None => format!("error: {}", failure.message),
    }
}

/// Machine-readable form for `--json`.
pub fn render_json(outcome: &ResponseOutcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(outcome)
}
