//! Gateway failure taxonomy.
//!
//! Every failure carries a human-readable message so the UI layer can show
//! it in a transient notification without inspecting the variant.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use milladmin_core::AdminError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The server rejected the payload with per-field validation messages.
    #[error("validation failed")]
    Validation(BTreeMap<String, String>),

    /// The response body did not match the expected envelope.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Single message suitable for a toast.
    pub fn message(&self) -> String {
        match self {
            Self::Transport(msg) => format!("network error: {msg}"),
            Self::Server { message, .. } => message.clone(),
            Self::Validation(fields) => fields
                .values()
                .next()
                .cloned()
                .unwrap_or_else(|| "validation failed".to_string()),
            Self::Decode(msg) => format!("malformed response: {msg}"),
        }
    }

    /// Normalize a failure body into the taxonomy.
    ///
    /// Recognizes the structured shape `{"errors": {"field": ["msg", ..]}}`
    /// and the plain `{"message": "..."}` shape; anything else falls back to
    /// a generic status message.
    pub fn from_failure_body(status: u16, body: &Value) -> Self {
        if let Some(errors) = body.get("errors").and_then(Value::as_object) {
            let mut fields = BTreeMap::new();
            for (field, messages) in errors {
                let first = match messages {
                    Value::Array(items) => items.first().and_then(Value::as_str),
                    Value::String(s) => Some(s.as_str()),
                    _ => None,
                };
                if let Some(msg) = first {
                    fields.insert(field.clone(), msg.to_string());
                }
            }
            if !fields.is_empty() {
                return Self::Validation(fields);
            }
        }

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self::Server { status, message }
    }
}

impl From<GatewayError> for AdminError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Validation(fields) => AdminError::Validation(fields),
            GatewayError::Server { status: 404, .. } => AdminError::NotFound,
            other => AdminError::Gateway(other.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_structured_validation_body() {
        let body = json!({
            "errors": {
                "mobile": ["Enter valid 10-digit mobile number", "second ignored"],
                "name": ["Name is required"],
            }
        });
        let err = GatewayError::from_failure_body(422, &body);
        match err {
            GatewayError::Validation(fields) => {
                assert_eq!(fields["mobile"], "Enter valid 10-digit mobile number");
                assert_eq!(fields["name"], "Name is required");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_message_then_generic() {
        let err = GatewayError::from_failure_body(500, &json!({"message": "boom"}));
        assert_eq!(err.message(), "boom");

        let err = GatewayError::from_failure_body(500, &json!({"unexpected": true}));
        assert_eq!(err.message(), "request failed with status 500");
    }

    #[test]
    fn not_found_maps_to_admin_not_found() {
        let err = GatewayError::Server { status: 404, message: "gone".to_string() };
        assert_eq!(AdminError::from(err), AdminError::NotFound);
    }
}
