//! Client error types
//!
//! Every API operation reports failure through [`ApiError`], a closed set of
//! variants the presentation layer can branch on, no matter which endpoint
//! failed or how the server shaped its error body.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Failure of a call against the ticketing API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No HTTP response was received (DNS, connection refused, CORS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Credentials missing, invalid, or not allowed to perform the action
    #[error("{message}")]
    Auth { status: u16, message: String },

    /// Request content was rejected, either locally or by the server
    #[error("{message}")]
    Validation {
        message: String,
        /// Field name to problem description
        fields: BTreeMap<String, String>,
    },

    /// Requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Any other unsuccessful or unreadable response
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Messages the API returns with a 2xx status when the bearer token is rejected
const SOFT_AUTH_MESSAGES: &[&str] = &["Missing Token", "Invalid or Expired Token", "Forbidden"];

/// Messages the API returns with a 2xx status when the target is missing
const SOFT_NOT_FOUND_MESSAGES: &[&str] = &["Event not found"];

/// Plain-text bodies longer than this are not shown to the user
const MAX_TEXT_MESSAGE_LEN: usize = 200;

impl ApiError {
    /// Classify an unsuccessful HTTP response
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: Option<Value> = serde_json::from_slice(body).ok();

        let message = parsed
            .as_ref()
            .and_then(extract_message)
            .or_else(|| text_message(body))
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        match status {
            400 | 422 => ApiError::Validation {
                message,
                fields: parsed.as_ref().map(extract_fields).unwrap_or_default(),
            },
            401 | 403 => ApiError::Auth { status, message },
            404 => ApiError::NotFound(message),
            _ => ApiError::Server { status, message },
        }
    }

    /// Recognize an error reported inside a successful response.
    ///
    /// Write endpoints answer some rejections with HTTP 200 and a bare
    /// `{"message": ...}` body; those are mapped onto the matching variant.
    pub fn from_soft_failure(status: u16, body: &Value) -> Option<Self> {
        let message = body.get("message")?.as_str()?;

        if SOFT_AUTH_MESSAGES.contains(&message) {
            return Some(ApiError::Auth {
                status,
                message: message.to_string(),
            });
        }

        if SOFT_NOT_FOUND_MESSAGES.contains(&message) {
            return Some(ApiError::NotFound(message.to_string()));
        }

        None
    }

    /// Build a validation error from per-field problems found locally
    pub fn invalid_fields(fields: BTreeMap<String, String>) -> Self {
        let names: Vec<&str> = fields.keys().map(String::as_str).collect();
        ApiError::Validation {
            message: format!("Please check: {}", names.join(", ")),
            fields,
        }
    }

    /// Human-readable message, without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network(message) => message,
            ApiError::Auth { message, .. } => message,
            ApiError::Validation { message, .. } => message,
            ApiError::NotFound(message) => message,
            ApiError::Server { message, .. } => message,
        }
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Auth { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::NotFound(_) => Some(404),
            ApiError::Network(_) | ApiError::Validation { .. } => None,
        }
    }

    /// Problem description for one form field
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            ApiError::Validation { fields, .. } => fields.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Short, stable name of the variant for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network",
            ApiError::Auth { .. } => "auth",
            ApiError::Validation { .. } => "validation",
            ApiError::NotFound(_) => "not_found",
            ApiError::Server { .. } => "server",
        }
    }

    /// Whether signing in again could resolve the failure
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }
}

fn extract_message(body: &Value) -> Option<String> {
    ["message", "error", "detail"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            // {"error": {"message": "..."}}
            Value::Object(_) => value.get("message")?.as_str().map(str::to_string),
            _ => None,
        })
}

fn extract_fields(body: &Value) -> BTreeMap<String, String> {
    let source = body
        .get("errors")
        .or_else(|| body.get("fields"))
        .and_then(Value::as_object);

    let Some(source) = source else {
        return BTreeMap::new();
    };

    source
        .iter()
        .filter_map(|(field, problem)| {
            let text = match problem {
                Value::String(s) => s.clone(),
                // ["too short", "required"] → first entry
                Value::Array(items) => items.first()?.as_str()?.to_string(),
                _ => return None,
            };
            Some((field.clone(), text))
        })
        .collect()
}

fn text_message(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?.trim();
    if text.is_empty() || text.starts_with('<') || text.len() > MAX_TEXT_MESSAGE_LEN {
        return None;
    }
    Some(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ApiError::from_response(401, b""),
            ApiError::Auth { status: 401, .. }
        ));
        assert!(matches!(
            ApiError::from_response(403, b""),
            ApiError::Auth { status: 403, .. }
        ));
        assert!(matches!(
            ApiError::from_response(400, b""),
            ApiError::Validation { .. }
        ));
        assert!(matches!(
            ApiError::from_response(422, b""),
            ApiError::Validation { .. }
        ));
        assert!(matches!(
            ApiError::from_response(404, b""),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_response(500, b""),
            ApiError::Server { status: 500, .. }
        ));
    }

    #[test]
    fn test_server_message_is_surfaced_verbatim() {
        let err = ApiError::from_response(400, br#"{"message": "Title required"}"#);
        assert_eq!(err.message(), "Title required");
        assert_eq!(err.to_string(), "Title required");
    }

    #[test]
    fn test_error_key_fallback() {
        let err = ApiError::from_response(500, br#"{"error": "database is locked"}"#);
        assert_eq!(err.message(), "database is locked");
        assert_eq!(err.to_string(), "Server error 500: database is locked");
    }

    #[test]
    fn test_synthesized_message() {
        let err = ApiError::from_response(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.message(), "Request failed with status 502");

        let err = ApiError::from_response(503, b"upstream unavailable");
        assert_eq!(err.message(), "upstream unavailable");
    }

    #[test]
    fn test_validation_fields() {
        let body = json!({
            "message": "Invalid event",
            "errors": { "title": "required", "capacity": ["must be positive"] }
        });
        let err = ApiError::from_response(422, body.to_string().as_bytes());

        assert_eq!(err.field("title"), Some("required"));
        assert_eq!(err.field("capacity"), Some("must be positive"));
        assert_eq!(err.field("date"), None);
    }

    #[test]
    fn test_soft_failures() {
        let err = ApiError::from_soft_failure(200, &json!({"message": "Missing Token"}));
        assert!(matches!(err, Some(ApiError::Auth { status: 200, .. })));

        let err = ApiError::from_soft_failure(200, &json!({"message": "Event not found"}));
        assert_eq!(err, Some(ApiError::NotFound("Event not found".to_string())));

        let ok = ApiError::from_soft_failure(200, &json!({"message": "Event created successfully"}));
        assert!(ok.is_none());
    }

    #[test]
    fn test_invalid_fields_message() {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), "Title is required".to_string());
        fields.insert("date".to_string(), "Use YYYY-MM-DDTHH:MM".to_string());

        let err = ApiError::invalid_fields(fields);
        assert_eq!(err.message(), "Please check: date, title");
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.status(), None);
    }
}
