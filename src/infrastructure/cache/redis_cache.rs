//! Redis-backed link store.

use super::service::{CacheError, CacheResult, LinkStore};
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Maximum number of records kept in the local cache.
const LOCAL_CAPACITY: u64 = 10_000;

/// A locally cached hit together with the TTL hint it was fetched with.
#[derive(Clone)]
struct CachedValue {
    value: Value,
    ttl: Duration,
}

/// Expires each local entry after the TTL hint of the lookup that stored it.
struct HintExpiry;

impl Expiry<String, CachedValue> for HintExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Redis link store for redirect lookups.
///
/// Uses `ConnectionManager` for connection reuse. Hits are kept in an
/// in-process cache for the TTL hint passed to [`LinkStore::get`]; misses
/// always go to Redis so that freshly registered links resolve immediately.
pub struct RedisLinkStore {
    client: ConnectionManager,
    local: Cache<String, CachedValue>,
}

impl RedisLinkStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        let manager = connect_manager(redis_url).await?;
        Ok(Self::new(manager))
    }

    /// Wraps an existing connection manager.
    pub fn new(manager: ConnectionManager) -> Self {
        let local = Cache::builder()
            .max_capacity(LOCAL_CAPACITY)
            .expire_after(HintExpiry)
            .build();

        Self {
            client: manager,
            local,
        }
    }

    /// Returns a handle to the underlying connection, shared with other Redis users.
    pub fn connection(&self) -> ConnectionManager {
        self.client.clone()
    }
}

/// Opens a managed Redis connection and checks it with PING.
///
/// # Errors
///
/// Returns [`CacheError::ConnectionError`] on any failure.
async fn connect_manager(redis_url: &str) -> CacheResult<ConnectionManager> {
    info!("Connecting to Redis at {}", redis_url);

    let client = Client::open(redis_url)
        .map_err(|e| CacheError::ConnectionError(format!("Failed to create Redis client: {}", e)))?;

    let manager = ConnectionManager::new(client)
        .await
        .map_err(|e| CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e)))?;

    let mut test_conn = manager.clone();
    test_conn
        .ping::<()>()
        .await
        .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

    info!("✓ Connected to Redis");
    Ok(manager)
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn get(&self, key: &str, ttl: Duration) -> CacheResult<Option<Value>> {
        if let Some(cached) = self.local.get(key).await {
            debug!("Local cache HIT: {}", key);
            return Ok(Some(cached.value));
        }

        let mut conn = self.client.clone();
        let raw = conn
            .get::<_, Option<String>>(key)
            .await
            .map_err(|e| CacheError::OperationError(format!("Redis GET {}: {}", key, e)))?;

        let Some(raw) = raw else {
            debug!("Cache MISS: {}", key);
            return Ok(None);
        };

        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| CacheError::OperationError(format!("Invalid JSON at {}: {}", key, e)))?;

        debug!("Cache HIT: {}", key);
        if !ttl.is_zero() {
            self.local
                .insert(
                    key.to_string(),
                    CachedValue {
                        value: value.clone(),
                        ttl,
                    },
                )
                .await;
        }

        Ok(Some(value))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
