//! Error taxonomy for calls against the account API.
//!
//! DESIGN
//! ======
//! The client signals exactly two failure kinds: the server answered with a
//! non-success status (`ApiError::Http`), or no usable answer arrived
//! (`ApiError::Network`). Local form validation never produces an
//! `ApiError`; see `forms`.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::collections::BTreeMap;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server responded with a non-2xx status.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        /// Per-field messages from an `errors` object in the body, if any.
        field_errors: BTreeMap<String, String>,
    },

    /// The request could not complete or the response could not be read.
    #[error("Network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Build the HTTP variant from a failed response's status and raw body.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed = ErrorBody::parse(body);
        Self::Http {
            status,
            message: parsed.message.unwrap_or_else(|| http_error_message(status)),
            field_errors: parsed.errors,
        }
    }

    /// HTTP status when the server responded.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) => None,
        }
    }

    /// `true` for the 401 the identity check uses to mean "not logged in".
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Server-supplied field errors; `None` when there are none.
    #[must_use]
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Http { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }
}

/// Message synthesized when the error body carries no usable `message`.
#[must_use]
pub fn http_error_message(status: u16) -> String {
    format!("HTTP error {status}")
}

/// Error body schema accepted from the API.
///
/// Parsing is lenient: anything that does not match the expected shape is
/// dropped rather than failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub errors: BTreeMap<String, String>,
}

impl ErrorBody {
    #[must_use]
    pub fn parse(body: &[u8]) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        let message = match map.get("message") {
            Some(Value::String(m)) if !m.is_empty() => Some(m.clone()),
            _ => None,
        };
        let errors = match map.get("errors") {
            Some(Value::Object(fields)) => fields
                .iter()
                .filter_map(|(field, msg)| msg.as_str().map(|m| (field.clone(), m.to_owned())))
                .collect(),
            _ => BTreeMap::new(),
        };

        Self { message, errors }
    }
}

/// Invalid runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}
