//! Typed errors for Resource Manager API calls.
//!
//! Two failure channels reach callers: transport failures from the HTTP
//! layer ([`Error::Transport`]) and API-level errors returned in the JSON
//! error envelope ([`Error::Api`]). Neither is retried or suppressed here.

use serde_json::Value;
use thiserror::Error;

/// Standard Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing or malformed. Raised before any
    /// request is sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Credential initialization or token acquisition failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The request never produced an API response (connect, TLS, body
    /// read, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status and an error envelope.
    #[error("API error {code}: {status}: {message}")]
    Api {
        /// HTTP status code, or the envelope's own `code` when the error
        /// arrived embedded in an operation document.
        code: u16,
        /// RPC status string, e.g. `PERMISSION_DENIED`.
        status: String,
        /// Human-readable message, with envelope details folded in.
        message: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// An operation poll loop gave up before the server reported `done`.
    #[error("operation {name} did not complete after {polls} polls")]
    OperationTimedOut { name: String, polls: usize },
}

impl Error {
    /// True when the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { code: 404, .. })
    }

    /// Build an [`Error::Api`] from a Google REST error envelope.
    ///
    /// Handles the two common detail types:
    /// - `ErrorInfo`:  reason plus metadata values
    /// - `BadRequest`: per-field violations
    pub(crate) fn from_api_envelope(http_code: u16, body: &Value) -> Self {
        let err = &body["error"];
        let code = if http_code != 0 {
            http_code
        } else {
            err["code"].as_u64().unwrap_or(0) as u16
        };
        let status = err["status"].as_str().unwrap_or("UNKNOWN").to_string();
        let message = err["message"].as_str().unwrap_or("unknown error");

        let mut parts: Vec<String> = Vec::new();
        if let Some(details) = err["details"].as_array() {
            for d in details {
                if let Some(reason) = d["reason"].as_str() {
                    let meta: Vec<&str> = d["metadata"]
                        .as_object()
                        .map(|m| m.values().filter_map(|v| v.as_str()).collect())
                        .unwrap_or_default();
                    parts.push(if meta.is_empty() {
                        reason.to_string()
                    } else {
                        format!("{}: {}", reason, meta.join(", "))
                    });
                }
                if let Some(violations) = d["fieldViolations"].as_array() {
                    for v in violations {
                        let field = v["field"].as_str().unwrap_or("?");
                        let desc = v["description"].as_str().unwrap_or("invalid");
                        parts.push(format!("field '{}': {}", field, desc));
                    }
                }
            }
        }

        let message = if parts.is_empty() {
            message.to_string()
        } else {
            format!("{} ({})", message, parts.join("; "))
        };

        Error::Api { code, status, message }
    }
}
