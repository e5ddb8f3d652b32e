//! In-process link store.

use super::service::{CacheResult, LinkStore};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// A link store backed by a shared map.
///
/// Cloning shares the underlying map, so a test can keep a handle and insert
/// records while the server holds another. The TTL hint is ignored.
#[derive(Debug, Clone, Default)]
pub struct MemoryLinkStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under the complete key (e.g. `link:abc`).
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), value);
        }
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn get(&self, key: &str, _ttl: Duration) -> CacheResult<Option<Value>> {
        Ok(self
            .entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
