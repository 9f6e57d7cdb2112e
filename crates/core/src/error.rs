//! Error model for admin operations.

use std::collections::BTreeMap;

use thiserror::Error;

/// Result type used across the admin core.
pub type AdminResult<T> = Result<T, AdminError>;

/// Failure of an admin operation.
///
/// Every async operation resolves to this instead of propagating an
/// unhandled failure to the caller; the UI layer shows `message()` verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// Field-level validation failed before any network call was made.
    #[error("validation failed")]
    Validation(BTreeMap<String, String>),

    /// The remote gateway reported a failure (network or server).
    #[error("{0}")]
    Gateway(String),

    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A conflicting operation is already in flight.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl AdminError {
    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Single human-readable message suitable for a toast/alert.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(fields) => fields
                .values()
                .next()
                .cloned()
                .unwrap_or_else(|| "validation failed".to_string()),
            Self::Gateway(msg) => msg.clone(),
            Self::NotFound => "record not found".to_string(),
            Self::InvalidId(msg) => format!("invalid identifier: {msg}"),
            Self::Conflict(msg) => format!("conflict: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_picks_first_field() {
        let mut fields = BTreeMap::new();
        fields.insert("mobile".to_string(), "Enter valid 10-digit mobile number".to_string());
        fields.insert("name".to_string(), "Name is required".to_string());
        // BTreeMap orders by key, so "mobile" comes first.
        assert_eq!(
            AdminError::Validation(fields).message(),
            "Enter valid 10-digit mobile number"
        );
    }
}
