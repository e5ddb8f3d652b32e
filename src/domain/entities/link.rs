//! Link record entity as stored in the key-value backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A shortened-link entry as stored under `link:{slug}`.
///
/// Only `url` is interpreted by the resolver. Every other attribute
/// (slug, comment, creation time, expiry, ...) is kept in `extra` so that
/// the record can be handed to the access log exactly as it was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub url: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LinkRecord {
    /// Creates a record with a destination and no extra attributes.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extra: Map::new(),
        }
    }

    /// Parses a raw JSON value from the store.
    ///
    /// Returns `None` when the value is not an object or carries no string `url`.
    pub fn from_value(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }

    /// Returns an opaque attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}
