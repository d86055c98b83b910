//! Request and response types for the storefront REST API.

pub mod auth;
pub mod catalog;
pub mod orders;

use serde::{Deserialize, Serialize};

/// Error body returned by the API on a non-2xx response.
///
/// The backend reports either a plain message or, for request validation
/// failures, an array of per-field errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: ErrorDetail,
}

/// The `detail` field of an error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// A single human-readable message.
    Message(String),
    /// One entry per invalid field (FastAPI-style 422 body).
    Fields(Vec<FieldError>),
}

/// A single field validation error.
///
/// `loc` is a path into the request body; the last segment names the
/// offending field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
}

impl FieldError {
    /// The field name, taken from the last `loc` segment.
    fn field_name(&self) -> String {
        match self.loc.last() {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "request".to_string(),
        }
    }
}

impl ErrorDetail {
    /// Collapse the detail into one human-readable line.
    ///
    /// Field errors become `"{field}: {msg}"` pairs joined by `", "`, so
    /// the summary is deterministic for a given response body.
    pub fn summary(&self) -> String {
        match self {
            ErrorDetail::Message(msg) => msg.clone(),
            ErrorDetail::Fields(fields) => fields
                .iter()
                .map(|f| format!("{}: {}", f.field_name(), f.msg))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Like [`summary`](Self::summary), but falls back to `default` when
    /// the server supplied nothing usable.
    pub fn summary_or(&self, default: &str) -> String {
        let summary = self.summary();
        if summary.trim().is_empty() {
            default.to_string()
        } else {
            summary
        }
    }
}

impl std::fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_summary() {
        let detail = ErrorDetail::Message("Shipping address is required".to_string());
        assert_eq!(detail.summary(), "Shipping address is required");
    }

    #[test]
    fn test_field_errors_join_deterministically() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"detail": [
                {"loc": ["body", "phone"], "msg": "field required"},
                {"loc": ["body", "email"], "msg": "value is not a valid email address"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            body.detail.summary(),
            "phone: field required, email: value is not a valid email address"
        );
    }

    #[test]
    fn test_non_string_loc_segment() {
        let detail = ErrorDetail::Fields(vec![FieldError {
            loc: vec!["items".into(), 0.into()],
            msg: "quantity must be positive".to_string(),
        }]);
        assert_eq!(detail.summary(), "0: quantity must be positive");
    }

    #[test]
    fn test_summary_fallback() {
        let detail = ErrorDetail::Message("  ".to_string());
        assert_eq!(detail.summary_or("something broke"), "something broke");
        let detail = ErrorDetail::Message("nope".to_string());
        assert_eq!(detail.summary_or("something broke"), "nope");
    }

    #[test]
    fn test_plain_detail_parses_as_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"detail": "Email already registered"}"#).unwrap();
        assert_eq!(
            body.detail,
            ErrorDetail::Message("Email already registered".to_string())
        );
    }
}
