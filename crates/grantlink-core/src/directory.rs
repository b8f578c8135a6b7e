//! Directory abstraction over the organizational system of record.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using `DirectoryError`.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors surfaced by directory read/write operations.
///
/// The reconciler stringifies these into `Status.details.errorData`; the
/// enumerator propagates them to the transport layer untouched.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Authentication with the directory failed.
    #[error("directory authentication failed: {0}")]
    Auth(String),

    /// The directory rejected the request.
    #[error("directory API error: {code} - {message}")]
    Api { code: String, message: String },

    /// Transport-level failure reaching the directory.
    #[error("directory request failed: {0}")]
    Http(String),

    /// The directory returned data the bridge cannot interpret.
    #[error("invalid directory data: {0}")]
    InvalidData(String),
}

/// Organization membership role. The bridge reconciles exactly this axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    Admin,
    Member,
}

impl OrgRole {
    /// Wire representation used by the directory API.
    pub fn as_str(self) -> &'static str {
        match self {
            OrgRole::Admin => "admin",
            OrgRole::Member => "member",
        }
    }
}

impl fmt::Display for OrgRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrgRole {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(OrgRole::Admin),
            "member" => Ok(OrgRole::Member),
            other => Err(DirectoryError::InvalidData(format!(
                "unknown membership role: {other}"
            ))),
        }
    }
}

/// Directory-native record for an organization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrgSnapshot {
    /// Directory-native numeric identifier.
    pub id: i64,
    /// Organization display name, when set.
    pub name: Option<String>,
    /// Company field, when set.
    pub company: Option<String>,
    /// Free-text description, when set.
    pub description: Option<String>,
}

/// System of record for organization membership.
///
/// Implementations perform one blocking round trip per call; the core
/// never retries and never fans out.
#[async_trait]
pub trait OrgDirectory: Send + Sync {
    /// Read the organization's current attributes.
    async fn read_org(&self, org: &str) -> DirectoryResult<OrgSnapshot>;

    /// Read the subject's current role in the organization.
    ///
    /// Fails when no membership exists.
    async fn read_membership(&self, username: &str, org: &str) -> DirectoryResult<OrgRole>;

    /// Write the subject's role in the organization.
    async fn write_membership(
        &self,
        username: &str,
        org: &str,
        role: OrgRole,
    ) -> DirectoryResult<()>;
}

#[async_trait]
impl<D: OrgDirectory + ?Sized> OrgDirectory for Arc<D> {
    async fn read_org(&self, org: &str) -> DirectoryResult<OrgSnapshot> {
        (**self).read_org(org).await
    }

    async fn read_membership(&self, username: &str, org: &str) -> DirectoryResult<OrgRole> {
        (**self).read_membership(username, org).await
    }

    async fn write_membership(
        &self,
        username: &str,
        org: &str,
        role: OrgRole,
    ) -> DirectoryResult<()> {
        (**self).write_membership(username, org, role).await
    }
}
