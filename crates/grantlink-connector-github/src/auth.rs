//! GitHub App authentication and installation token caching.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::client::USER_AGENT_VALUE;
use crate::config::GithubConfig;
use crate::error::{GithubError, GithubResult};

/// Claims of the short-lived app JWT.
#[derive(Debug, Serialize)]
struct AppClaims {
    iat: i64,
    exp: i64,
    iss: String,
}

/// Installation token response from GitHub.
#[derive(Debug, Deserialize)]
struct InstallationTokenResponse {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Cached installation access token.
#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Returns true if the token is expired or will expire within the
    /// grace period.
    fn is_expired(&self, grace_period: Duration) -> bool {
        Utc::now() + grace_period >= self.expires_at
    }
}

/// Mints and caches installation access tokens for a GitHub App.
#[derive(Debug)]
pub struct AppTokenCache {
    config: GithubConfig,
    http_client: reqwest::Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// Grace period before expiry to trigger refresh (default: 5 minutes).
    grace_period: Duration,
}

impl AppTokenCache {
    /// Creates a new token cache.
    pub fn new(config: GithubConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
            cached_token: Arc::new(RwLock::new(None)),
            grace_period: Duration::minutes(5),
        }
    }

    /// Gets a valid installation token, refreshing if necessary.
    #[instrument(skip(self), fields(installation_id = self.config.installation_id))]
    pub async fn get_token(&self) -> GithubResult<String> {
        // Check if we have a valid cached token
        {
            let cache = self.cached_token.read().await;
            if let Some(ref token) = *cache {
                if !token.is_expired(self.grace_period) {
                    debug!("using cached installation token");
                    return Ok(token.token.clone());
                }
            }
        }

        debug!("refreshing installation token");
        let new_token = self.acquire_token().await?;

        // Update cache
        {
            let mut cache = self.cached_token.write().await;
            *cache = Some(new_token.clone());
        }

        Ok(new_token.token)
    }

    /// Signs an app JWT and exchanges it for an installation token.
    #[instrument(skip(self))]
    async fn acquire_token(&self) -> GithubResult<CachedToken> {
        let jwt = self.sign_app_jwt()?;

        let url = format!(
            "{}/app/installations/{}/access_tokens",
            self.config.api_base, self.config.installation_id
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&jwt)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await
            .map_err(|e| GithubError::Auth(format!("token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::Auth(format!(
                "token request failed with status {status}: {body}"
            )));
        }

        let token_response: InstallationTokenResponse = response
            .json()
            .await
            .map_err(|e| GithubError::Auth(format!("failed to parse token response: {e}")))?;

        debug!(expires_at = %token_response.expires_at, "acquired installation token");

        Ok(CachedToken {
            token: token_response.token,
            expires_at: token_response.expires_at,
        })
    }

    /// Builds the RS256 app JWT (issuer = app id).
    fn sign_app_jwt(&self) -> GithubResult<String> {
        let key = EncodingKey::from_rsa_pem(self.config.private_key.expose_secret().as_bytes())
            .map_err(|e| GithubError::Config(format!("invalid app private key: {e}")))?;

        let now = Utc::now();
        let claims = AppClaims {
            // Backdated to absorb clock drift between the bridge and GitHub.
            iat: (now - Duration::seconds(60)).timestamp(),
            exp: (now + Duration::minutes(9)).timestamp(),
            iss: self.config.app_id.clone(),
        };

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| GithubError::Auth(format!("failed to sign app JWT: {e}")))
    }

    /// Invalidates the cached token, forcing a refresh on next use.
    pub async fn invalidate(&self) {
        let mut cache = self.cached_token.write().await;
        *cache = None;
    }
}
