//! Directory entity snapshots exchanged over the webhook boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Resource kind tag for the single supported organization entity.
pub const ORG_KIND: &str = "github.v1.Organization";

/// Label key carrying the directory-native identifier.
pub const LABEL_ID: &str = "github/id";
/// Label key carrying the organization company field.
pub const LABEL_COMPANY: &str = "github/company";
/// Label key carrying the organization slug.
pub const LABEL_SLUG: &str = "github/slug";
/// Label key carrying the organization description.
pub const LABEL_DESCRIPTION: &str = "github/description";
/// Label key carrying the snapshot capture time.
pub const LABEL_TIMESTAMP: &str = "timestamp";

/// One directory entity snapshot.
///
/// Created fresh per enumeration response and never persisted. `labels`
/// is an open mapping of provider-specific attributes; incoming event
/// resources may omit any field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resource {
    /// Directory-native identifier, always stringified.
    pub id: String,
    /// Resource kind tag.
    pub kind: String,
    /// Human-readable name.
    pub display_name: String,
    /// Provider-specific attributes.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl Resource {
    /// Look up a label value.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// True when the resource kind contains `needle`, case-insensitively.
    pub fn kind_contains(&self, needle: &str) -> bool {
        self.kind.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Subject that triggered an event; shaped exactly like a [`Resource`].
pub type Actor = Resource;
