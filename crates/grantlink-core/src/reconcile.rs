//! Membership reconciliation for apply-update requests.

use tracing::{error, info, instrument};

use grantlink_types::{Event, Status, LABEL_ID, LABEL_SLUG, ORG_KIND};

use crate::directory::{OrgDirectory, OrgRole};

/// Interprets access events and converges the subject's organization
/// role against the directory.
pub struct MembershipReconciler<D> {
    directory: D,
}

impl<D: OrgDirectory> MembershipReconciler<D> {
    /// Create a reconciler over the given directory.
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Interpret an event batch and produce a single outcome.
    ///
    /// Always returns a serializable [`Status`]; directory failures are
    /// reclassified as `INTERNAL` rather than propagated. At most one
    /// read and one write are issued, with no retries.
    #[instrument(skip(self, events), fields(events = events.len()))]
    pub async fn apply(&self, events: &[Event]) -> Status {
        // Only the first actionable event in the batch is materialized.
        let Some(event) = events.iter().find(|e| e.is_access_event()) else {
            info!("received non-access related events");
            return Status::ok();
        };

        let desired = if event.is_grant() {
            OrgRole::Admin
        } else {
            OrgRole::Member
        };

        let Some(user) = subject_id(event) else {
            error!(action = %event.event, "missing user id");
            return Status::failed_precondition("could not get github user id");
        };

        let Some(org) = org_slug(event) else {
            error!(action = %event.event, "missing org id");
            return Status::failed_precondition("could not get github organization id");
        };

        let current = match self.directory.read_membership(user, org).await {
            Ok(role) => role,
            Err(e) => {
                error!(error = %e, %user, %org, "could not read membership");
                return Status::internal(e.to_string());
            }
        };

        if current == desired {
            error!(%current, %desired, "membership already at desired role");
            return Status::failed_precondition("user is already organization admin");
        }

        if let Err(e) = self.directory.write_membership(user, org, desired).await {
            error!(error = %e, %user, %org, "could not set membership");
            return Status::internal(e.to_string());
        }

        info!(%user, %org, role = %desired, "membership updated");
        Status::ok()
    }
}

/// Subject identity: the first user-kind resource's native id, falling
/// back to the actor's.
fn subject_id(event: &Event) -> Option<&str> {
    event
        .resources
        .iter()
        .find(|r| r.kind_contains("user"))
        .and_then(|r| r.label(LABEL_ID))
        .or_else(|| event.actor.as_ref().and_then(|a| a.label(LABEL_ID)))
}

/// Target organization: the first organization-kind resource's slug.
fn org_slug(event: &Event) -> Option<&str> {
    event
        .resources
        .iter()
        .find(|r| r.kind_contains(ORG_KIND))
        .and_then(|r| r.label(LABEL_SLUG))
}
