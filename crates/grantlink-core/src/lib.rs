//! Reconciliation core for the grantlink bridge.
//!
//! Two components with actual decision logic live here:
//!
//! - [`OrgEnumerator`] answers enumeration requests by describing the
//!   configured organization as a single resource snapshot.
//! - [`MembershipReconciler`] interprets a batch of access events and
//!   converges the subject's organization role, reporting a structured
//!   [`grantlink_types::Status`] instead of propagating errors.
//!
//! Both sit on the [`OrgDirectory`] trait; the GitHub implementation
//! lives in `grantlink-connector-github`.

mod directory;
mod enumerate;
mod reconcile;

// Re-exports
pub use directory::{DirectoryError, DirectoryResult, OrgDirectory, OrgRole, OrgSnapshot};
pub use enumerate::OrgEnumerator;
pub use reconcile::MembershipReconciler;
