//! `AccountStorage` implementation over the `details` table.

use async_trait::async_trait;
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use sqlx_postgres::PgPool;
use tracing::{debug, instrument, warn};

use hobbyhub_storage::{Account, AccountStorage, HobbyMutation, NewAccount, StorageError};

use crate::config::PostgresConfig;
use crate::error::{Result, is_unique_violation, sqlx_to_storage};
use crate::{migrations, pool};

/// Row shape of the `details` table. `hobbies` may be NULL in tables
/// created before the column default existed.
type DetailsRow = (String, String, Option<Vec<String>>);

fn account_from_row((name, password, hobbies): DetailsRow) -> Account {
    Account {
        username: name,
        password_hash: password,
        hobbies: hobbies.unwrap_or_default(),
    }
}

/// PostgreSQL-backed credential store.
#[derive(Debug, Clone)]
pub struct PostgresAccountStorage {
    pool: PgPool,
}

impl PostgresAccountStorage {
    /// Connects using `config`, running migrations when enabled.
    ///
    /// An unreachable database does not fail construction: the pool degrades
    /// to lazy connections and migrations are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or a migration fails on a
    /// reachable database.
    pub async fn new(config: PostgresConfig) -> Result<Self> {
        let pool = match pool::create_pool(&config).await {
            Ok(pool) => {
                if config.run_migrations {
                    migrations::run(&pool).await?;
                }
                pool
            }
            Err(e) => {
                warn!(
                    error = %e,
                    url = %pool::mask_password(&config.url),
                    "PostgreSQL unavailable at startup; queries will fail until it is reachable"
                );
                pool::create_lazy_pool(&config)?
            }
        };

        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AccountStorage for PostgresAccountStorage {
    #[instrument(skip(self))]
    async fn find(&self, username: &str) -> std::result::Result<Option<Account>, StorageError> {
        let row: Option<DetailsRow> = query_as(
            r#"
            SELECT name, password, hobbies
            FROM details
            WHERE name = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(sqlx_to_storage)?;

        Ok(row.map(account_from_row))
    }

    #[instrument(skip(self, account), fields(username = %account.username))]
    async fn create(&self, account: &NewAccount) -> std::result::Result<Account, StorageError> {
        let row: DetailsRow = query_as(
            r#"
            INSERT INTO details (name, password, hobbies)
            VALUES ($1, $2, '{}')
            RETURNING name, password, hobbies
            "#,
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StorageError::already_exists(&account.username)
            } else {
                sqlx_to_storage(e)
            }
        })?;

        debug!("account created");
        Ok(account_from_row(row))
    }

    #[instrument(skip(self, mutation), fields(op = mutation.kind()))]
    async fn mutate_hobbies(
        &self,
        username: &str,
        mutation: &HobbyMutation,
    ) -> std::result::Result<u64, StorageError> {
        let result = match mutation {
            HobbyMutation::Add(label) => {
                query("UPDATE details SET hobbies = array_append(hobbies, $1) WHERE name = $2")
                    .bind(label)
                    .bind(username)
                    .execute(&self.pool)
                    .await
            }
            HobbyMutation::Remove(label) => {
                query("UPDATE details SET hobbies = array_remove(hobbies, $1) WHERE name = $2")
                    .bind(label)
                    .bind(username)
                    .execute(&self.pool)
                    .await
            }
            HobbyMutation::Rename { from, to } => {
                query(
                    "UPDATE details SET hobbies = array_replace(hobbies, $1, $2) WHERE name = $3",
                )
                .bind(from)
                .bind(to)
                .bind(username)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(sqlx_to_storage)?;

        Ok(result.rows_affected())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
