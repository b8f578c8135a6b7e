//! Error types for the GitHub connector.

use thiserror::Error;

use grantlink_core::DirectoryError;

/// Result type alias using `GithubError`.
pub type GithubResult<T> = Result<T, GithubError>;

/// Errors that can occur when talking to the GitHub API.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Configuration validation error.
    #[error("configuration error: {0}")]
    Config(String),

    /// App credential or installation token error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// The GitHub API rejected the request.
    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<GithubError> for DirectoryError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::Config(message) => DirectoryError::InvalidData(message),
            GithubError::Auth(message) => DirectoryError::Auth(message),
            GithubError::Api { status, message } => DirectoryError::Api {
                code: status.to_string(),
                message,
            },
            GithubError::Http(e) => DirectoryError::Http(e.to_string()),
            GithubError::Json(e) => DirectoryError::InvalidData(e.to_string()),
        }
    }
}
