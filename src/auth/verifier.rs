//! External identity verification.
//!
//! Sign-in presents a short-lived OAuth access token together with the email it
//! claims to belong to. [`TokenInfoVerifier`] asks the provider's tokeninfo endpoint
//! who the token was issued to. [`BypassVerifier`] wraps any verifier with the
//! operator bypass secrets.
//!
//! # Security
//!
//! The bypass secrets are a trapdoor. A caller holding either one can sign in as
//! any email without the provider being consulted. They are only honoured when
//! `IDENTITY_BYPASS_ENABLED=true`, and should stay disabled (or be rotated) in
//! production.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::IdentityConfig;
use crate::error::AuthError;

/// Confirms that a login token belongs to the claimed email.
///
/// Implementations never fail: every error resolves to `false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, email: &str, access_token: &str) -> bool;
}

/// Subset of the tokeninfo response we rely on
#[derive(Debug, Deserialize)]
pub struct TokenInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub verified_email: bool,
}

/// Verifier backed by an OAuth2 tokeninfo endpoint
pub struct TokenInfoVerifier {
    client: reqwest::Client,
    tokeninfo_url: String,
}

impl TokenInfoVerifier {
    pub fn new(tokeninfo_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            tokeninfo_url: tokeninfo_url.into(),
        })
    }

    /// Ask the provider who the token belongs to
    pub async fn introspect(&self, access_token: &str) -> Result<TokenInfo, AuthError> {
        let response = self
            .client
            .post(&self.tokeninfo_url)
            .query(&[("access_token", access_token)])
            .send()
            .await
            .map_err(|e| AuthError::VerifierUnreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::VerifierUnreachable(format!(
                "tokeninfo returned {}",
                status
            )));
        }

        response
            .json::<TokenInfo>()
            .await
            .map_err(|e| AuthError::VerifierUnreachable(e.to_string()))
    }
}

#[async_trait]
impl IdentityVerifier for TokenInfoVerifier {
    async fn verify(&self, email: &str, access_token: &str) -> bool {
        match self.introspect(access_token).await {
            Ok(info) => {
                let matches = info.email.as_deref() == Some(email) && info.verified_email;
                debug!(email = %email, verified = info.verified_email, matches, "Identity provider answered");
                matches
            }
            Err(e) => {
                warn!(email = %email, error = %e, "Identity verification failed");
                false
            }
        }
    }
}

/// Accepts the configured bypass secrets before delegating to `inner`
pub struct BypassVerifier<V> {
    inner: V,
    secrets: Vec<String>,
}

impl<V: IdentityVerifier> BypassVerifier<V> {
    pub fn new(inner: V, secrets: Vec<String>) -> Self {
        let secrets = secrets.into_iter().filter(|s| !s.is_empty()).collect();
        Self { inner, secrets }
    }

    fn is_bypass(&self, access_token: &str) -> bool {
        !access_token.is_empty() && self.secrets.iter().any(|secret| secret == access_token)
    }
}

#[async_trait]
impl<V: IdentityVerifier> IdentityVerifier for BypassVerifier<V> {
    async fn verify(&self, email: &str, access_token: &str) -> bool {
        if self.is_bypass(access_token) {
            warn!(email = %email, "Identity verification bypassed with operator secret");
            return true;
        }
        self.inner.verify(email, access_token).await
    }
}

/// Build the verifier described by the identity configuration
pub fn from_config(config: &IdentityConfig) -> Result<Arc<dyn IdentityVerifier>, reqwest::Error> {
    let provider = TokenInfoVerifier::new(
        config.tokeninfo_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;

    if !config.bypass_enabled {
        return Ok(Arc::new(provider));
    }

    warn!("Identity bypass secrets are ENABLED; disable IDENTITY_BYPASS_ENABLED in production");
    let secrets = [&config.master_token, &config.internal_secret]
        .into_iter()
        .flatten()
        .cloned()
        .collect();

    Ok(Arc::new(BypassVerifier::new(provider, secrets)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{extract::Query, routing::post, Json, Router};
    use serde_json::json;

    use super::*;

    /// Serve a fake tokeninfo endpoint that knows a single token
    async fn spawn_tokeninfo(
        known_token: &'static str,
        email: &'static str,
        verified: bool,
    ) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let app = Router::new().route(
            "/tokeninfo",
            post(move |Query(params): Query<HashMap<String, String>>| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    if params.get("access_token").map(String::as_str) == Some(known_token) {
                        Ok(Json(json!({ "email": email, "verified_email": verified })))
                    } else {
                        Err(axum::http::StatusCode::BAD_REQUEST)
                    }
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/tokeninfo", addr), hits)
    }

    fn provider(url: &str) -> TokenInfoVerifier {
        TokenInfoVerifier::new(url, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_accepts_matching_verified_email() {
        let (url, hits) = spawn_tokeninfo("good-token", "a@x.com", true).await;

        assert!(provider(&url).verify("a@x.com", "good-token").await);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejects_other_email() {
        let (url, _) = spawn_tokeninfo("good-token", "b@x.com", true).await;

        assert!(!provider(&url).verify("a@x.com", "good-token").await);
    }

    #[tokio::test]
    async fn test_rejects_unverified_email() {
        let (url, _) = spawn_tokeninfo("good-token", "a@x.com", false).await;

        assert!(!provider(&url).verify("a@x.com", "good-token").await);
    }

    #[tokio::test]
    async fn test_provider_error_fails_closed() {
        let (url, _) = spawn_tokeninfo("good-token", "a@x.com", true).await;

        assert!(!provider(&url).verify("a@x.com", "badtoken").await);
    }

    #[tokio::test]
    async fn test_unreachable_provider_fails_closed() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let verifier = provider(&format!("http://{}/tokeninfo", addr));
        assert!(matches!(
            verifier.introspect("anything").await,
            Err(AuthError::VerifierUnreachable(_))
        ));
        assert!(!verifier.verify("a@x.com", "anything").await);
    }

    #[tokio::test]
    async fn test_master_token_skips_provider() {
        let mut inner = MockIdentityVerifier::new();
        inner.expect_verify().never();

        let verifier = BypassVerifier::new(inner, vec!["operator-master-token".to_string()]);
        assert!(verifier.verify("a@x.com", "operator-master-token").await);
    }

    #[tokio::test]
    async fn test_non_bypass_token_delegates() {
        let mut inner = MockIdentityVerifier::new();
        inner
            .expect_verify()
            .withf(|email, token| email.to_string() == "a@x.com" && token.to_string() == "badtoken")
            .times(1)
            .returning(|_, _| false);

        let verifier = BypassVerifier::new(inner, vec!["operator-master-token".to_string()]);
        assert!(!verifier.verify("a@x.com", "badtoken").await);
    }

    #[tokio::test]
    async fn test_empty_token_never_matches_empty_secret() {
        let mut inner = MockIdentityVerifier::new();
        inner.expect_verify().times(1).returning(|_, _| false);

        let verifier = BypassVerifier::new(inner, vec![String::new()]);
        assert!(!verifier.verify("a@x.com", "").await);
    }

    #[tokio::test]
    async fn test_bypass_disabled_by_config_consults_provider() {
        let (url, hits) = spawn_tokeninfo("good-token", "a@x.com", true).await;
        let config = IdentityConfig {
            tokeninfo_url: url,
            timeout_secs: 2,
            bypass_enabled: false,
            master_token: Some("operator-master-token".to_string()),
            internal_secret: None,
            superadmin_emails: vec![],
        };

        let verifier = from_config(&config).unwrap();
        assert!(!verifier.verify("a@x.com", "operator-master-token").await);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bypass_enabled_by_config_accepts_internal_secret() {
        let (url, hits) = spawn_tokeninfo("good-token", "a@x.com", true).await;
        let config = IdentityConfig {
            tokeninfo_url: url,
            timeout_secs: 2,
            bypass_enabled: true,
            master_token: Some("operator-master-token".to_string()),
            internal_secret: Some("internal-shared-secret".to_string()),
            superadmin_emails: vec![],
        };

        let verifier = from_config(&config).unwrap();
        assert!(verifier.verify("a@x.com", "internal-shared-secret").await);
        assert!(verifier.verify("a@x.com", "operator-master-token").await);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
