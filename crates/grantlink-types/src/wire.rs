//! JSON envelopes for the webhook boundary.

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::resource::Resource;
use crate::status::Status;

/// Enumeration request: which resource kinds the caller wants described.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullUpdateRequest {
    pub kinds: Vec<String>,
}

/// Enumeration response.
///
/// `resources` is omitted entirely when the request did not name a
/// supported kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullUpdateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Resource>>,
}

/// Apply-update request: ordered batch of upstream access events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyUpdateRequest {
    pub events: Vec<Event>,
}

/// Apply-update response; `status` is always present, even on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyUpdateResponse {
    pub status: Status,
}

/// Inbound webhook payload, discriminated by which field is present.
///
/// `kinds` takes precedence when both appear. A body carrying neither
/// fails to deserialize; the dispatcher answers it with `unknown request`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WebhookRequest {
    Pull(PullUpdateRequest),
    Apply(ApplyUpdateRequest),
}
