use async_trait::async_trait;
use log::{debug, error};
use sqlx::PgPool;

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::UrlRecord;

type Result<T> = std::result::Result<T, RepositoryError>;

/// Store capability the URL service is built on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepositoryTrait: Send + Sync {
    /// Inserts a new record holding only `url` and returns it with the
    /// store-assigned `id` and `created_at`.
    ///
    /// ### Errors
    /// * `RepositoryError::Database` - If a database error occurs
    /// * `RepositoryError::InvalidData` - If the row violates a constraint
    async fn insert(&self, url: &str) -> Result<UrlRecord>;

    /// Writes `alias` onto the record with the given `id`.
    ///
    /// ### Returns
    /// * `Result<u64>` - number of rows affected, always 1 on success
    ///
    /// ### Errors
    /// * `RepositoryError::NotFound` - If no record has this id
    /// * `RepositoryError::Conflict` - If another record already owns the alias
    /// * `RepositoryError::Database` - If a database error occurs
    async fn set_alias(&self, id: i64, alias: &str) -> Result<u64>;

    /// Exact, case-sensitive lookup by alias.
    ///
    /// ### Returns
    /// * `Result<Option<UrlRecord>>` - the record, or `None` if no alias matches
    ///
    /// ### Errors
    /// * `RepositoryError::Database` - If a database error occurs
    async fn find_by_alias(&self, alias: &str) -> Result<Option<UrlRecord>>;
}

// Postgres-backed implementation
pub struct UrlRepository {
    pool: PgPool,
}

impl UrlRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl UrlRepositoryTrait for UrlRepository {
    async fn insert(&self, url: &str) -> Result<UrlRecord> {
        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
                INSERT INTO urls (url)
                VALUES ($1)
                RETURNING id, url, alias, created_at
            "#,
        )
        .bind(url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to insert URL: {}", e);
            RepositoryError::from(e)
        })?;

        debug!("Inserted URL with id {}", record.id);
        Ok(record)
    }

    async fn set_alias(&self, id: i64, alias: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE urls SET alias = $1 WHERE id = $2")
            .bind(alias)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to set alias for id {}: {}", id, e);
                RepositoryError::from(e)
            })?;

        let affected = result.rows_affected();
        if affected == 0 {
            return Err(RepositoryError::NotFound(format!("URL with id {} not found", id)));
        }

        debug!("Assigned alias '{}' to id {}", alias, id);
        Ok(affected)
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<UrlRecord>> {
        sqlx::query_as::<_, UrlRecord>(
            r#"
                SELECT id, url, alias, created_at
                FROM urls
                WHERE alias = $1
            "#,
        )
        .bind(alias)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::Database)
    }
}
