//! Key-value access for slug lookups.
//!
//! Provides a [`LinkStore`] trait with two implementations:
//! - [`RedisLinkStore`] - Production Redis store with a local TTL cache
//! - [`MemoryLinkStore`] - In-process map for tests and local runs

mod memory;
mod redis_cache;
mod service;

pub use memory::MemoryLinkStore;
pub use redis_cache::RedisLinkStore;
pub use service::{CacheError, CacheResult, LinkStore};

#[cfg(test)]
pub use service::MockLinkStore;
