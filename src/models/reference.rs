//! Reference to another QuickBooks entity.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A pointer to a related entity by id, with an optional display name.
///
/// Serializes as `{"value": "<id>", "name": "<label>"}`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceType {
    /// Canonical id of the referenced entity.
    pub value: String,

    /// Human-readable label.
    pub name: Option<String>,
}

impl ReferenceType {
    /// Reference an entity by id only.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: None,
        }
    }

    /// Reference an entity by id with a display name.
    pub fn named(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: Some(name.into()),
        }
    }
}
