//! Result of one fetch as the presentation layer sees it.
//!
//! # Design
//! Every way a fetch can end is representable here, so a renderer always
//! has something to show. The payload stays a generic `serde_json::Value`
//! because the upstream schema format is not fixed; object key order is
//! preserved for display.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureCategory {
    /// 2xx status, but the body is not JSON.
    MalformedResponse,
    NotFound,
    /// 401 or 403.
    Unauthorized,
    /// Any other non-2xx status.
    HttpError,
    /// No status was received at all.
    NetworkError,
}

impl FailureCategory {
    /// Hint shown under the error message, if the category has one.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            FailureCategory::NotFound => {
                Some("Verify the workspace/branch identifiers and the endpoint path.")
            }
            FailureCategory::Unauthorized => {
                Some("Verify the service-account credentials and their permissions.")
            }
            FailureCategory::MalformedResponse
            | FailureCategory::HttpError
            | FailureCategory::NetworkError => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub category: FailureCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl Failure {
    pub fn new(category: FailureCategory, status: Option<u16>, message: String) -> Self {
        Self {
            category,
            status,
            message,
            remediation: category.remediation().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum ResponseOutcome {
    Success(Value),
    Failure(Failure),
}

impl ResponseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseOutcome::Success(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ResponseOutcome::Failure(failure) => Some(failure),
            ResponseOutcome::Success(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn remediation_only_for_actionable_categories() {
        assert!(FailureCategory::NotFound.remediation().unwrap().contains("workspace/branch identifiers"));
        assert!(FailureCategory::Unauthorized.remediation().unwrap().contains("service-account credentials"));
        assert!(FailureCategory::HttpError.remediation().is_none());
        assert!(FailureCategory::NetworkError.remediation().is_none());
    }

    #[test]
    fn success_serializes_with_tag() {
        let outcome = ResponseOutcome::Success(json!({"b": 1, "a": 2}));
        let text = serde_json::to_string(&outcome).unwrap();
        assert_eq!(text, r#"{"outcome":"success","data":{"b":1,"a":2}}"#);
    }

    #[test]
    fn failure_serialization_skips_absent_fields() {
        let outcome = ResponseOutcome::Failure(Failure::new(
            FailureCategory::NetworkError,
            None,
            "connection refused".to_string(),
        ));
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["outcome"], "failure");
        assert_eq!(value["data"]["category"], "NetworkError");
        assert!(value["data"].get("status").is_none());
        assert!(value["data"].get("remediation").is_none());
    }
}
