//! Authentication for Resource Manager API calls
//!
//! Tokens come from Application Default Credentials (ADC): a service
//! account key, workload identity, or gcloud CLI credentials. The
//! [`TokenProvider`] trait is the seam that lets tests inject a fixed
//! token instead.

use crate::error::{Error, Result};
use async_trait::async_trait;
use gcp_auth::TokenProvider as _;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default scopes for Resource Manager API access
pub const DEFAULT_SCOPES: &[&str] = &["https://www.googleapis.com/auth/cloud-platform"];

/// Token expiry buffer - refresh tokens this much before they actually expire
/// This prevents using tokens that are about to expire during a request
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Default token TTL if we can't determine expiry (conservative: 30 minutes)
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Source of bearer tokens for API calls.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a token valid for at least the next request.
    async fn token(&self) -> Result<String>;
}

/// Token provider that returns a fixed string without any network call.
/// Intended for tests against mock servers.
pub struct StaticToken(pub String);

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// ADC-backed credentials with token caching
#[derive(Clone)]
pub struct AdcCredentials {
    provider: Arc<dyn gcp_auth::TokenProvider>,
    scopes: Vec<String>,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

impl AdcCredentials {
    /// Create new credentials using Application Default Credentials
    pub async fn new(scopes: &[String]) -> Result<Self> {
        let provider = gcp_auth::provider().await.map_err(|e| {
            Error::Auth(format!(
                "failed to initialize ADC (run 'gcloud auth application-default login'): {e}"
            ))
        })?;

        let scopes = if scopes.is_empty() {
            DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect()
        } else {
            scopes.to_vec()
        };

        Ok(Self {
            provider,
            scopes,
            token_cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Force refresh the token
    pub async fn refresh_token(&self) -> Result<String> {
        {
            let mut cache = self.token_cache.write().await;
            *cache = None;
        }
        self.token().await
    }
}

#[async_trait]
impl TokenProvider for AdcCredentials {
    /// Get an access token, reusing the cached one while it is still valid
    async fn token(&self) -> Result<String> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        let scopes: Vec<&str> = self.scopes.iter().map(String::as_str).collect();
        let token = self
            .provider
            .token(&scopes)
            .await
            .map_err(|e| Error::Auth(format!("failed to get access token: {e}")))?;

        let token_str = token.as_str().to_string();

        // gcp_auth exposes expiry as an Option; use a conservative default
        // TTL with the buffer applied
        let expires_at = Instant::now() + DEFAULT_TOKEN_TTL - TOKEN_EXPIRY_BUFFER;

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: token_str.clone(),
                expires_at,
            });
        }

        tracing::debug!(
            "New token cached, expires in ~{} minutes",
            (DEFAULT_TOKEN_TTL - TOKEN_EXPIRY_BUFFER).as_secs() / 60
        );

        Ok(token_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_token_returns_fixed_value() {
        let provider = StaticToken("fake-token".to_string());
        assert_eq!(provider.token().await.unwrap(), "fake-token");
    }

    #[test]
    fn cached_token_expiry() {
        let live = CachedToken {
            token: "t".into(),
            expires_at: Instant::now() + Duration::from_secs(60),
        };
        assert!(live.is_valid());

        let stale = CachedToken {
            token: "t".into(),
            expires_at: Instant::now() - Duration::from_secs(1),
        };
        assert!(!stale.is_valid());
    }
}
