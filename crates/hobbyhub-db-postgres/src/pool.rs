//! Connection pool management for the PostgreSQL storage backend.

use std::time::Duration;

use sqlx_core::pool::PoolOptions;
use sqlx_postgres::{PgPool, Postgres};
use tracing::{debug, info, instrument};

use crate::config::PostgresConfig;
use crate::error::{PostgresError, Result};

/// Type alias for PostgreSQL pool options.
pub type PgPoolOptions = PoolOptions<Postgres>;

fn pool_options(config: &PostgresConfig) -> PgPoolOptions {
    let min_connections = config
        .min_connections
        .unwrap_or(config.pool_size / 4)
        .max(1)
        .min(config.pool_size);

    let max_lifetime_secs = config.max_lifetime_secs.unwrap_or(1800);

    let mut options = PgPoolOptions::new()
        .max_connections(config.pool_size)
        .min_connections(min_connections)
        .acquire_timeout(Duration::from_millis(config.connect_timeout_ms))
        .max_lifetime(Duration::from_secs(max_lifetime_secs))
        .test_before_acquire(false);

    if let Some(idle_timeout) = config.idle_timeout_ms {
        options = options.idle_timeout(Duration::from_millis(idle_timeout));
    }

    options
}

/// Creates a new PostgreSQL connection pool from the given configuration.
///
/// Eagerly opens connections, so an unreachable server is reported here.
#[instrument(skip(config), fields(url = %mask_password(&config.url)))]
pub async fn create_pool(config: &PostgresConfig) -> Result<PgPool> {
    info!(
        pool_size = config.pool_size,
        min_connections = ?config.min_connections,
        connect_timeout_ms = config.connect_timeout_ms,
        max_lifetime_secs = ?config.max_lifetime_secs,
        "Creating PostgreSQL connection pool"
    );

    let pool = pool_options(config).connect(&config.url).await?;

    debug!("PostgreSQL connection pool created successfully");

    Ok(pool)
}

/// Creates a pool that connects on first use.
///
/// Only fails when the URL itself cannot be parsed.
pub fn create_lazy_pool(config: &PostgresConfig) -> Result<PgPool> {
    pool_options(config)
        .connect_lazy(&config.url)
        .map_err(|e| PostgresError::config(format!("invalid connection url: {e}")))
}

/// Masks the password in a database URL for logging.
///
/// The userinfo ends at the last `@`, and the password starts after the
/// first `:` within it.
pub fn mask_password(url: &str) -> String {
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    if let Some(at_pos) = url.rfind('@')
        && at_pos > scheme_end
        && let Some(colon_offset) = url[scheme_end..at_pos].find(':')
    {
        let colon_pos = scheme_end + colon_offset;
        return format!("{}:****{}", &url[..colon_pos], &url[at_pos..]);
    }
    url.to_string()
}
