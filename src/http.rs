//! HTTP utilities for Resource Manager REST API calls

use crate::error::{Error, Result};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        format!(
            "{}... [truncated, {} bytes total]",
            &body[..MAX_LOG_BODY_LENGTH],
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Resource Manager API calls
///
/// Owns bearer-token injection, JSON decoding, and error-envelope
/// translation. Cheap to clone; all handles derived from one client share
/// the underlying connection pool.
#[derive(Clone)]
pub(crate) struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(Error::Transport)?;

        Ok(Self { client })
    }

    /// Make a GET request
    pub async fn get(&self, url: &str, token: &str, query: &[(&str, String)]) -> Result<Value> {
        tracing::debug!("GET {}", url);
        let request = self.client.get(url).query(query).bearer_auth(token);
        Self::dispatch(Method::GET, url, request).await
    }

    /// Make a POST request with an optional JSON body and query string
    pub async fn post(
        &self,
        url: &str,
        token: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        tracing::debug!("POST {}", url);
        let mut request = self.client.post(url).query(query).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::dispatch(Method::POST, url, request).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put(&self, url: &str, token: &str, body: &Value) -> Result<Value> {
        tracing::debug!("PUT {}", url);
        let request = self.client.put(url).bearer_auth(token).json(body);
        Self::dispatch(Method::PUT, url, request).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str, token: &str) -> Result<Value> {
        tracing::debug!("DELETE {}", url);
        let request = self.client.delete(url).bearer_auth(token);
        Self::dispatch(Method::DELETE, url, request).await
    }

    async fn dispatch(
        method: Method,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Value> {
        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Security: only log sanitized/truncated error bodies
            tracing::error!("{} {} failed: {} - {}", method, url, status, sanitize_for_log(&body));
            return Err(api_error(status, &body));
        }

        // DELETE and :undelete can answer with an empty body
        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(Error::Decode)
    }
}

/// Translate a non-success response into [`Error::Api`], falling back to
/// the bare status line when the body is not a parseable envelope.
fn api_error(status: StatusCode, body: &str) -> Error {
    match serde_json::from_str::<Value>(body) {
        Ok(envelope) if envelope.get("error").is_some() => {
            Error::from_api_envelope(status.as_u16(), &envelope)
        }
        _ => Error::Api {
            code: status.as_u16(),
            status: status
                .canonical_reason()
                .unwrap_or("UNKNOWN")
                .to_ascii_uppercase()
                .replace(' ', "_"),
            message: sanitize_for_log(body),
        },
    }
}
