//! Cache backend: an in-process DashMap or a shared Redis instance.

use dashmap::DashMap;
use deadpool_redis::Pool;
use redis::AsyncCommands;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Errors raised by the cache backend.
///
/// Only the Redis mode can fail; the local map is infallible.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// No connection could be taken from the pool.
    #[error("cache connection failed: {0}")]
    Connection(String),

    /// Redis rejected or failed a command.
    #[error("cache command failed: {0}")]
    Command(String),
}

impl From<deadpool_redis::PoolError> for CacheError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        Self::Connection(err.to_string())
    }
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        Self::Command(err.to_string())
    }
}

/// A cached entry with TTL support.
#[derive(Clone, Debug)]
pub struct CachedEntry {
    pub data: Arc<Vec<u8>>,
    pub cached_at: Instant,
    pub ttl: Duration,
}

impl CachedEntry {
    /// Create a new cached entry.
    pub fn new(data: Vec<u8>, ttl: Duration) -> Self {
        Self {
            data: Arc::new(data),
            cached_at: Instant::now(),
            ttl,
        }
    }

    /// Check if this entry has expired.
    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() > self.ttl
    }

    /// Time left before the entry expires.
    pub fn remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.cached_at.elapsed())
    }
}

/// Key/value cache with per-entry expiry.
///
/// ## Cache Modes
///
/// - **Local**: Single-instance mode using only DashMap
/// - **Redis**: Multi-instance mode; every read and write goes to Redis
///
/// Redis mode keeps no local tier, so a write by one instance is visible to
/// the next read on any other. Writes are awaited and their failures returned.
#[derive(Clone)]
pub enum CacheBackend {
    /// Single-instance: local DashMap only
    Local(Arc<DashMap<String, CachedEntry>>),

    /// Multi-instance: shared Redis
    Redis { redis: Pool },
}

impl CacheBackend {
    /// Create a new local-only cache backend.
    pub fn new_local() -> Self {
        CacheBackend::Local(Arc::new(DashMap::new()))
    }

    /// Create a new Redis-backed cache backend.
    pub fn new_redis(redis_pool: Pool) -> Self {
        CacheBackend::Redis { redis: redis_pool }
    }

    /// Get a value from the cache.
    ///
    /// Expired local entries are dropped on read.
    pub async fn get(&self, key: &str) -> Result<Option<Arc<Vec<u8>>>, CacheError> {
        match self {
            CacheBackend::Local(map) => {
                if let Some(entry) = map.get(key) {
                    if !entry.is_expired() {
                        tracing::debug!(key = %key, "cache hit (local)");
                        return Ok(Some(Arc::clone(&entry.data)));
                    }
                    drop(entry);
                    map.remove(key);
                }
                tracing::debug!(key = %key, "cache miss");
                Ok(None)
            }
            CacheBackend::Redis { redis } => {
                let mut conn = redis.get().await?;
                let data = conn.get::<_, Option<Vec<u8>>>(key).await?;
                match data {
                    Some(data) => {
                        tracing::debug!(key = %key, "cache hit (redis)");
                        Ok(Some(Arc::new(data)))
                    }
                    None => {
                        tracing::debug!(key = %key, "cache miss");
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Set a value in the cache with TTL, replacing any previous entry and
    /// restarting its expiry.
    pub async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        match self {
            CacheBackend::Local(map) => {
                // Expired entries that are never read again are dropped here.
                map.retain(|_, entry| !entry.is_expired());
                map.insert(key.to_string(), CachedEntry::new(value, ttl));
                tracing::debug!(key = %key, ttl_secs = ttl.as_secs(), "cache set (local)");
                Ok(())
            }
            CacheBackend::Redis { redis } => {
                let mut conn = redis.get().await?;
                let ttl_secs = ttl.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, ttl_secs).await?;
                tracing::debug!(key = %key, ttl_secs, "cache set (redis)");
                Ok(())
            }
        }
    }

    /// Remaining lifetime of `key`, or `None` if it is absent.
    pub async fn ttl(&self, key: &str) -> Result<Option<Duration>, CacheError> {
        match self {
            CacheBackend::Local(map) => Ok(map
                .get(key)
                .filter(|entry| !entry.is_expired())
                .map(|entry| entry.remaining())),
            CacheBackend::Redis { redis } => {
                let mut conn = redis.get().await?;
                // -2: missing key, -1: key without expiry
                let secs: i64 = conn.ttl(key).await?;
                Ok(match secs {
                    -2 => None,
                    s if s < 0 => Some(Duration::MAX),
                    s => Some(Duration::from_secs(s as u64)),
                })
            }
        }
    }

    /// Remove every entry.
    ///
    /// In Redis mode this empties the whole logical database (`FLUSHDB`).
    pub async fn flush(&self) -> Result<(), CacheError> {
        match self {
            CacheBackend::Local(map) => {
                let dropped = map.len();
                map.clear();
                tracing::info!(dropped, "cache flushed (local)");
                Ok(())
            }
            CacheBackend::Redis { redis } => {
                let mut conn = redis.get().await?;
                let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;
                tracing::info!("cache flushed (redis)");
                Ok(())
            }
        }
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        match self {
            CacheBackend::Local(map) => CacheStats {
                local_entries: Some(map.len()),
                mode: "local",
            },
            CacheBackend::Redis { .. } => CacheStats {
                local_entries: None,
                mode: "redis",
            },
        }
    }

    /// Check if Redis is available (for health checks).
    pub async fn is_redis_available(&self) -> bool {
        match self {
            CacheBackend::Local(_) => false,
            CacheBackend::Redis { redis } => redis.get().await.is_ok(),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Entry count of the local map; `None` in Redis mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_entries: Option<usize>,
    pub mode: &'static str,
}
