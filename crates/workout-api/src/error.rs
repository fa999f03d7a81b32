//! The structured failure returned by every [`crate::WorkoutApi`] call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, timeout, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered, but with a failure.
    #[error("{}", describe(.status, .message, .errors))]
    Response {
        status: Option<u16>,
        message: Option<String>,
        errors: BTreeMap<String, String>,
    },

    /// A success response whose body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Wire shape of an error body: `{ message?, errors?: { field: message } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl ApiError {
    /// A failure with a status and a single message.
    pub fn with_message(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Response {
            status,
            message: Some(message.into()),
            errors: BTreeMap::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(Some(404), message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(Some(400), message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_message(Some(401), message)
    }

    /// Build a failure from a status code and a decoded error body.
    pub fn from_body(status: u16, body: ErrorBody) -> Self {
        Self::Response {
            status: Some(status),
            message: body.message,
            errors: body.errors,
        }
    }

    /// HTTP status, when the service responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Response { status, .. } => *status,
            Self::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Messages meant for the user: the top-level message if present,
    /// otherwise one per field error. Empty for transport and decode
    /// failures.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            Self::Response {
                message: Some(message),
                ..
            } => vec![message.clone()],
            Self::Response { errors, .. } => errors.values().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// The error body this failure would be serialized as.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            Self::Response {
                message, errors, ..
            } => ErrorBody {
                message: message.clone(),
                errors: errors.clone(),
            },
            other => ErrorBody {
                message: Some(other.to_string()),
                errors: BTreeMap::new(),
            },
        }
    }
}

fn describe(
    status: &Option<u16>,
    message: &Option<String>,
    errors: &BTreeMap<String, String>,
) -> String {
    let mut out = match status {
        Some(code) => format!("request rejected with status {code}"),
        None => "request rejected".to_string(),
    };
    if let Some(msg) = message {
        out.push_str(": ");
        out.push_str(msg);
    } else if !errors.is_empty() {
        let fields: Vec<String> = errors.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        out.push_str(": ");
        out.push_str(&fields.join(", "));
    }
    out
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_takes_priority_over_field_errors() {
        let mut errors = BTreeMap::new();
        errors.insert("name".to_string(), "Plan name is required".to_string());
        let err = ApiError::Response {
            status: Some(400),
            message: Some("Validation failed".to_string()),
            errors,
        };
        assert_eq!(err.user_messages(), vec!["Validation failed".to_string()]);
    }

    #[test]
    fn field_errors_yield_one_message_each() {
        let mut errors = BTreeMap::new();
        errors.insert("name".to_string(), "Plan name is required".to_string());
        errors.insert(
            "description".to_string(),
            "Description must not exceed 500 characters".to_string(),
        );
        let err = ApiError::from_body(
            400,
            ErrorBody {
                message: None,
                errors,
            },
        );
        assert_eq!(err.user_messages().len(), 2);
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = ApiError::not_found("Plan not found");
        assert_eq!(
            err.to_string(),
            "request rejected with status 404: Plan not found"
        );
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn statusless_failure_still_carries_message() {
        let err = ApiError::with_message(None, "Invalid credentials");
        assert_eq!(err.status(), None);
        assert_eq!(err.user_messages(), vec!["Invalid credentials".to_string()]);
    }
}
