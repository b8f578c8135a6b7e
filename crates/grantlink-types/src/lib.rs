//! Wire data model for the grantlink reconciliation bridge.
//!
//! The governance platform talks to the bridge with two JSON envelopes
//! over a single webhook endpoint: an enumeration ("pull") request naming
//! resource kinds, and an apply-update request carrying access events.
//! This crate holds the serde types for both, the [`Resource`] snapshot
//! model, and the closed [`StatusCode`] taxonomy shared by every outcome.
//!
//! Nothing in here performs I/O; the decision logic lives in
//! `grantlink-core`.

mod event;
mod resource;
mod status;
mod wire;

// Re-exports
pub use event::{Event, GRANT_EVENT};
pub use resource::{
    Actor, Resource, LABEL_COMPANY, LABEL_DESCRIPTION, LABEL_ID, LABEL_SLUG, LABEL_TIMESTAMP,
    ORG_KIND,
};
pub use status::{Status, StatusCode, StatusDetails};
pub use wire::{
    ApplyUpdateRequest, ApplyUpdateResponse, PullUpdateRequest, PullUpdateResponse, WebhookRequest,
};
