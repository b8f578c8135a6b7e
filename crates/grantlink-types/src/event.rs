//! Upstream access-decision records.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::resource::{Actor, Resource};

/// Pattern an event action must match to be actionable.
static ACCESS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("grant|revoke").expect("ACCESS_PATTERN is a valid regex pattern"));

/// Action name of an access grant decision.
pub const GRANT_EVENT: &str = "access/grant";

/// One access-decision record pushed by the governance platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Dotted action name, e.g. `access/grant`.
    pub event: String,
    /// Subject that triggered the event; fallback source of identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Actor>,
    /// Entities the decision applies to, in upstream order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
}

impl Event {
    /// True when this event records an access grant or revocation.
    pub fn is_access_event(&self) -> bool {
        ACCESS_PATTERN.is_match(&self.event)
    }

    /// True when this event grants access (the exact `access/grant`
    /// action; anything else actionable is treated as a revocation).
    pub fn is_grant(&self) -> bool {
        self.event == GRANT_EVENT
    }
}
