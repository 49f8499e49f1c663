//! Database migration management for the PostgreSQL storage backend.
//!
//! This module uses embedded migrations for single-binary deployment.

use sqlx_core::migrate::{Migration, MigrationType};
use sqlx_postgres::PgPool;
use std::borrow::Cow;
use tracing::{info, instrument};

use crate::error::Result;

/// Macro to define embedded migrations at compile time.
///
/// Each migration is a tuple of (version, description, sql).
macro_rules! embedded_migrations {
    () => {
        &[(
            20260101000001i64,
            "create_details",
            include_str!("../../migrations/20260101000001_create_details.sql"),
        )]
    };
}

/// Builds a vector of Migration structs from embedded migration data.
fn build_migrations() -> Vec<Migration> {
    embedded_migrations!()
        .iter()
        .map(|(version, description, sql)| Migration {
            version: *version,
            description: Cow::Borrowed(description),
            migration_type: MigrationType::Simple,
            sql: Cow::Borrowed(sql),
            checksum: Cow::Borrowed(&[]),
            no_tx: false,
        })
        .collect()
}

/// Runs all pending database migrations.
///
/// Applied migrations are tracked in the `_sqlx_migrations` table. The
/// account table is created with `IF NOT EXISTS`, so databases that already
/// hold a `details` table only gain the unique index.
///
/// # Errors
///
/// Returns an error if a migration fails to execute.
#[instrument(skip(pool))]
pub async fn run(pool: &PgPool) -> Result<()> {
    info!("Running database migrations (embedded)");

    let migrations = build_migrations();
    info!("Found {} migration(s) to apply", migrations.len());

    let migrator = sqlx_core::migrate::Migrator {
        migrations: Cow::Owned(migrations),
        ignore_missing: false,
        locking: true,
        no_tx: false,
    };

    migrator
        .run(pool)
        .await
        .map_err(|e| crate::error::PostgresError::Migration(format!("Migration failed: {}", e)))?;

    info!("Database migrations completed successfully");

    Ok(())
}
