//! Resource enumeration for pull requests.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, instrument};

use grantlink_types::{
    PullUpdateResponse, Resource, LABEL_COMPANY, LABEL_DESCRIPTION, LABEL_ID, LABEL_SLUG,
    LABEL_TIMESTAMP, ORG_KIND,
};

use crate::directory::{DirectoryResult, OrgDirectory};

/// Answers enumeration requests for the single supported organization
/// kind.
pub struct OrgEnumerator<D> {
    directory: D,
    org: String,
}

impl<D: OrgDirectory> OrgEnumerator<D> {
    /// Create an enumerator for the configured organization.
    pub fn new(directory: D, org: impl Into<String>) -> Self {
        Self {
            directory,
            org: org.into(),
        }
    }

    /// Describe the current state of the requested resource kinds.
    ///
    /// Returns an empty response when the organization kind is not among
    /// `kinds`. Directory failures propagate to the caller; the transport
    /// layer surfaces them instead of the status channel.
    #[instrument(skip(self, kinds), fields(org = %self.org))]
    pub async fn pull(&self, kinds: &[String]) -> DirectoryResult<PullUpdateResponse> {
        if !kinds.iter().any(|k| k == ORG_KIND) {
            debug!("no supported kind requested");
            return Ok(PullUpdateResponse::default());
        }

        let snapshot = self.directory.read_org(&self.org).await?;
        let name = snapshot.name.unwrap_or_default();

        // Absent upstream fields render as empty strings, not omissions.
        let labels = BTreeMap::from([
            (LABEL_ID.to_string(), snapshot.id.to_string()),
            (
                LABEL_COMPANY.to_string(),
                snapshot.company.unwrap_or_default(),
            ),
            (LABEL_SLUG.to_string(), name.clone()),
            (
                LABEL_DESCRIPTION.to_string(),
                snapshot.description.unwrap_or_default(),
            ),
            (
                LABEL_TIMESTAMP.to_string(),
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        ]);

        debug!(id = snapshot.id, "organization snapshot enumerated");

        Ok(PullUpdateResponse {
            resources: Some(vec![Resource {
                id: snapshot.id.to_string(),
                kind: ORG_KIND.to_string(),
                display_name: name,
                labels,
            }]),
        })
    }
}
