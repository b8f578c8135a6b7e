//! Organization profile and membership operations.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use grantlink_core::{DirectoryResult, OrgDirectory, OrgRole, OrgSnapshot};

use crate::auth::AppTokenCache;
use crate::client::GithubClient;
use crate::config::GithubConfig;
use crate::error::GithubResult;

/// Organization profile response from the REST API.
#[derive(Debug, Deserialize)]
struct OrgResponse {
    id: i64,
    name: Option<String>,
    company: Option<String>,
    description: Option<String>,
}

/// Membership record for one user in one organization.
#[derive(Debug, Deserialize)]
struct MembershipResponse {
    role: String,
    #[allow(dead_code)]
    state: Option<String>,
}

/// Membership write payload.
#[derive(Debug, Serialize)]
struct MembershipRequest {
    role: OrgRole,
}

/// GitHub-backed implementation of the organization directory.
#[derive(Debug)]
pub struct GithubDirectory {
    client: GithubClient,
}

impl GithubDirectory {
    /// Builds the directory from app configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid or the HTTP
    /// client cannot be constructed.
    pub fn new(config: GithubConfig) -> GithubResult<Self> {
        config.validate()?;
        let api_base = config.api_base.clone();
        let token_cache = Arc::new(AppTokenCache::new(config));
        let client = GithubClient::new(token_cache, api_base)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl OrgDirectory for GithubDirectory {
    #[instrument(skip(self))]
    async fn read_org(&self, org: &str) -> DirectoryResult<OrgSnapshot> {
        let url = format!("{}/orgs/{}", self.client.base_url(), org);
        let response: OrgResponse = self.client.get(&url).await?;

        Ok(OrgSnapshot {
            id: response.id,
            name: response.name,
            company: response.company,
            description: response.description,
        })
    }

    #[instrument(skip(self))]
    async fn read_membership(&self, username: &str, org: &str) -> DirectoryResult<OrgRole> {
        let url = format!(
            "{}/orgs/{}/memberships/{}",
            self.client.base_url(),
            org,
            username
        );
        let response: MembershipResponse = self.client.get(&url).await?;
        response.role.parse()
    }

    #[instrument(skip(self))]
    async fn write_membership(
        &self,
        username: &str,
        org: &str,
        role: OrgRole,
    ) -> DirectoryResult<()> {
        let url = format!(
            "{}/orgs/{}/memberships/{}",
            self.client.base_url(),
            org,
            username
        );
        self.client.put(&url, &MembershipRequest { role }).await?;

        info!(%username, %org, %role, "membership role written");
        Ok(())
    }
}
