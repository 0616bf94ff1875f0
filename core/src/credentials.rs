//! Service-account credentials for HTTP Basic authentication.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ApiError;

/// How a form with only one of name/secret filled in is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CredentialPolicy {
    /// Partial input counts as "no credentials". A warning is logged.
    #[default]
    Lenient,
    /// Partial input is rejected with `ApiError::PartialCredentials`.
    Strict,
}

/// A name/secret pair, both non-blank after trimming.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    name: String,
    secret: String,
}

impl Credentials {
    /// Returns `None` unless both fields are non-blank.
    pub fn new(name: &str, secret: &str) -> Option<Self> {
        let name = name.trim();
        let secret = secret.trim();
        if name.is_empty() || secret.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            secret: secret.to_string(),
        })
    }

    /// Resolve raw form fields under `policy`.
    ///
    /// Both blank is always `Ok(None)`. Exactly one blank is `Ok(None)` under
    /// `Lenient` and `Err(PartialCredentials)` under `Strict`.
    pub fn from_form(
        name: &str,
        secret: &str,
        policy: CredentialPolicy,
    ) -> Result<Option<Self>, ApiError> {
        let has_name = !name.trim().is_empty();
        let has_secret = !secret.trim().is_empty();
        if has_name == has_secret {
            return Ok(Self::new(name, secret));
        }
        match policy {
            CredentialPolicy::Lenient => {
                tracing::warn!(has_name, has_secret, "partial credentials ignored, sending request unauthenticated");
                Ok(None)
            }
            CredentialPolicy::Strict => Err(ApiError::PartialCredentials),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value for the `authorization` header: `Basic base64(name:secret)`.
    pub fn basic_authorization(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.name, self.secret));
        format!("Basic {token}")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_authorization_uses_standard_padded_base64() {
        let creds = Credentials::new("svc", "pw").unwrap();
        // "svc:pw" is six bytes, so no padding; "ab:c" needs one '='.
        assert_eq!(creds.basic_authorization(), "Basic c3ZjOnB3");
        let creds = Credentials::new("ab", "c").unwrap();
        assert_eq!(creds.basic_authorization(), "Basic YWI6Yw==");
    }

    #[test]
    fn secret_bytes_outside_url_safe_alphabet_stay_standard() {
        // "?:>" encodes to "Pzo+" with the standard alphabet, "Pzo-" url-safe.
        let creds = Credentials::new("?", ">").unwrap();
        assert_eq!(creds.basic_authorization(), "Basic Pzo+");
    }

    #[test]
    fn fields_are_trimmed() {
        let creds = Credentials::new("  svc ", "\tpw\n").unwrap();
        assert_eq!(creds.name(), "svc");
        assert_eq!(creds.basic_authorization(), "Basic c3ZjOnB3");
    }

    #[test]
    fn blank_fields_yield_none() {
        assert!(Credentials::new("", "pw").is_none());
        assert!(Credentials::new("svc", "   ").is_none());
        assert!(Credentials::new("", "").is_none());
    }

    #[test]
    fn lenient_policy_drops_partial_input() {
        let creds = Credentials::from_form("svc", "", CredentialPolicy::Lenient).unwrap();
        assert!(creds.is_none());
    }

    #[test]
    fn strict_policy_rejects_partial_input() {
        let err = Credentials::from_form("", "pw", CredentialPolicy::Strict).unwrap_err();
        assert_eq!(err, ApiError::PartialCredentials);
    }

    #[test]
    fn strict_policy_accepts_empty_form() {
        let creds = Credentials::from_form(" ", "", CredentialPolicy::Strict).unwrap();
        assert!(creds.is_none());
    }

    #[test]
    fn debug_hides_secret() {
        let creds = Credentials::new("svc", "hunter2").unwrap();
        let shown = format!("{creds:?}");
        assert!(shown.contains("svc"));
        assert!(!shown.contains("hunter2"));
    }
}
