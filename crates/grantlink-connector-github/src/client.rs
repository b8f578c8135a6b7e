//! GitHub REST API HTTP client with installation token injection.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::auth::AppTokenCache;
use crate::error::{GithubError, GithubResult};

/// User-Agent the GitHub API requires on every request.
pub(crate) const USER_AGENT_VALUE: &str = "grantlink-bridge";

/// REST API version pinned by the connector.
const API_VERSION: &str = "2022-11-28";

/// Error body returned by the GitHub REST API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[allow(dead_code)]
    documentation_url: Option<String>,
}

/// GitHub REST API client.
///
/// Performs exactly one attempt per call; the reconciliation protocol
/// owns no retry policy, so none lives here either.
#[derive(Debug)]
pub struct GithubClient {
    http_client: reqwest::Client,
    token_cache: Arc<AppTokenCache>,
    api_base: String,
}

impl GithubClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(token_cache: Arc<AppTokenCache>, api_base: impl Into<String>) -> GithubResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GithubError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            token_cache,
            api_base: api_base.into(),
        })
    }

    /// Returns the base URL for REST API requests.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.api_base
    }

    /// Performs a GET request with automatic token injection.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> GithubResult<T> {
        let response = self.send(reqwest::Method::GET, url, None::<&()>).await?;
        response.json().await.map_err(GithubError::from)
    }

    /// Performs a PUT request, discarding any response body.
    #[instrument(skip(self, body))]
    pub async fn put<B: Serialize>(&self, url: &str, body: &B) -> GithubResult<()> {
        self.send(reqwest::Method::PUT, url, Some(body)).await?;
        Ok(())
    }

    /// Sends one request and maps non-success statuses to [`GithubError`].
    async fn send<B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> GithubResult<reqwest::Response> {
        let token = self.token_cache.get_token().await?;

        let mut request = self
            .http_client
            .request(method, url)
            .bearer_auth(&token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT_VALUE)
            .header("X-GitHub-Api-Version", API_VERSION);

        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            debug!(%status, "request succeeded");
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&error_body)
            .map(|body| body.message)
            .unwrap_or(error_body);

        Err(GithubError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
