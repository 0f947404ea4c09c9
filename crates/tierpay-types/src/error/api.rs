//! Admin API error body.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error code the backend returns while the payment processor credentials
/// written moments ago have not propagated yet.
pub const STRIPE_NOT_CONFIGURED: &str = "STRIPE_NOT_CONFIGURED";

/// One entry of the `errors` array in an admin API error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorEntry {
    /// Machine-readable code, e.g. `STRIPE_NOT_CONFIGURED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Error class reported by the backend (`ValidationError`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Structured failure returned by any admin API write or read.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[error("API error ({status}): {}", summary(.errors))]
pub struct ApiError {
    /// HTTP status code of the failed response
    pub status: u16,
    /// Error entries in the order the backend sent them
    pub errors: Vec<ApiErrorEntry>,
}

impl ApiError {
    /// Build a single-entry error. Mostly useful for fakes and tests.
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            errors: vec![ApiErrorEntry {
                code: Some(code.into()),
                message: message.into(),
                kind: None,
                context: None,
            }],
        }
    }

    /// Code of the first entry. The backend puts the decisive error first.
    pub fn first_code(&self) -> Option<&str> {
        self.errors.first().and_then(|e| e.code.as_deref())
    }

    /// The processor is not ready yet; the write may succeed if retried.
    pub fn is_stripe_not_configured(&self) -> bool {
        self.first_code() == Some(STRIPE_NOT_CONFIGURED)
    }
}

fn summary(errors: &[ApiErrorEntry]) -> String {
    match errors.first() {
        Some(entry) => match entry.code.as_deref() {
            Some(code) => format!("{} [{}]", entry.message, code),
            None => entry.message.clone(),
        },
        None => "no error details".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_entry() {
        let value = serde_json::json!({
            "message": "Stripe is not configured",
            "code": "STRIPE_NOT_CONFIGURED",
            "type": "ValidationError",
            "context": null,
            "id": "8a1c"
        });
        let entry: ApiErrorEntry = serde_json::from_value(value).unwrap();
        assert_eq!(entry.code.as_deref(), Some(STRIPE_NOT_CONFIGURED));
        assert_eq!(entry.kind.as_deref(), Some("ValidationError"));
        assert_eq!(entry.context, None);
    }

    #[test]
    fn test_only_first_code_is_decisive() {
        let mut err = ApiError::new(422, "VALIDATION_ERROR", "bad tier");
        err.errors.push(ApiErrorEntry {
            code: Some(STRIPE_NOT_CONFIGURED.to_string()),
            message: "not ready".to_string(),
            kind: None,
            context: None,
        });
        assert_eq!(err.first_code(), Some("VALIDATION_ERROR"));
        assert!(!err.is_stripe_not_configured());

        let ready = ApiError::new(422, STRIPE_NOT_CONFIGURED, "not ready");
        assert!(ready.is_stripe_not_configured());
    }

    #[test]
    fn test_empty_error_list_display() {
        let err = ApiError { status: 500, errors: Vec::new() };
        assert_eq!(err.first_code(), None);
        assert_eq!(err.to_string(), "API error (500): no error details");
    }
}
