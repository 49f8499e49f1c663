pub mod accounts;
pub mod cache;
pub mod config;
pub mod handlers;
pub mod observability;
pub mod server;
pub mod templates;

pub use accounts::{AccountError, AccountService, AccountSettings, LoginOutcome, LoginSource};
pub use cache::{CacheBackend, CacheError, CachedEntry, UserSnapshot};
pub use config::{
    AccountsConfig, AppConfig, CacheConfig, PostgresStorageConfig, RedisConfig, ServerConfig,
    StorageBackend,
};
pub use observability::init_tracing;
pub use server::{AppState, HobbyhubServer, ServerBuilder, account_settings, build_app};

use hobbyhub_storage::DynAccountStorage;
use std::sync::Arc;

/// Create a cache backend based on configuration.
///
/// ## Cache Modes
///
/// - **Redis disabled**: Returns local-only cache (DashMap)
/// - **Redis enabled**: Returns a Redis-backed cache
///
/// An unreachable Redis is logged and the pool is kept: cache operations
/// fail per request until Redis comes back. There is no fallback to the
/// local map.
///
/// # Errors
///
/// Returns an error if the Redis URL cannot be turned into a pool.
pub async fn create_cache_backend(config: &RedisConfig) -> anyhow::Result<CacheBackend> {
    use std::time::Duration;

    if !config.enabled {
        tracing::info!("Redis disabled, using local cache only");
        return Ok(CacheBackend::new_local());
    }

    tracing::info!(url = %hobbyhub_db_postgres::mask_password(&config.url), "Connecting to Redis");

    let mut redis_config = deadpool_redis::Config::from_url(&config.url);
    let timeout = Some(Duration::from_millis(config.timeout_ms));
    let mut pool_config = deadpool_redis::PoolConfig::new(config.pool_size);
    pool_config.timeouts.wait = timeout;
    pool_config.timeouts.create = timeout;
    pool_config.timeouts.recycle = timeout;
    redis_config.pool = Some(pool_config);

    let pool = redis_config.create_pool(Some(deadpool_redis::Runtime::Tokio1))?;

    match pool.get().await {
        Ok(_) => tracing::info!("Connected to Redis"),
        Err(e) => tracing::warn!(
            error = %e,
            "Redis unavailable at startup; cache operations will fail until it is reachable"
        ),
    }

    Ok(CacheBackend::new_redis(pool))
}

/// Create the credential store selected by `storage.backend`.
///
/// # Errors
///
/// Returns an error for an invalid PostgreSQL URL or a failed migration.
pub async fn create_account_storage(cfg: &AppConfig) -> anyhow::Result<DynAccountStorage> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory credential store; accounts are lost on restart");
            Ok(hobbyhub_db_memory::create_account_storage())
        }
        StorageBackend::Postgres => {
            let backend_cfg = cfg.storage.postgres.to_backend_config();
            let storage: DynAccountStorage =
                Arc::new(hobbyhub_db_postgres::PostgresAccountStorage::new(backend_cfg).await?);
            Ok(storage)
        }
    }
}
