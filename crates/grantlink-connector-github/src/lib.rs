//! GitHub directory connector for grantlink.
//!
//! Implements the `grantlink-core` [`OrgDirectory`] seam against the
//! GitHub REST API, authenticating as a GitHub App installation.
//!
//! # Features
//!
//! - GitHub App authentication (RS256 app JWT exchanged for an
//!   installation token, cached until shortly before expiry)
//! - Organization profile reads
//! - Organization membership reads and role writes
//!
//! Every API call is attempted exactly once; the reconciliation protocol
//! owns no retry policy, so neither does this connector.
//!
//! [`OrgDirectory`]: grantlink_core::OrgDirectory

mod auth;
mod client;
mod config;
mod error;
mod orgs;

// Re-exports
pub use auth::AppTokenCache;
pub use client::GithubClient;
pub use config::{GithubConfig, DEFAULT_API_BASE};
pub use error::{GithubError, GithubResult};
pub use orgs::GithubDirectory;
