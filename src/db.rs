use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use sqlx::migrate::MigrateDatabase;
use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    Postgres,
};
use thiserror::Error;

use crate::config::DatabaseConfig;

const URLS_TABLE: &str = "urls";

const CREATE_URLS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS urls (
        id BIGSERIAL PRIMARY KEY,
        url TEXT NOT NULL,
        alias VARCHAR(255) UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Schema setup error: {0}")]
    SchemaError(String),

    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    #[error("Failed to create database: {0}")]
    DatabaseCreationFailed(String),
}

pub type DbResult<T> = Result<T, DatabaseError>;

/// Represents an established database connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

/// Database health status
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DBHealthStatus {
    Healthy,
    Unhealthy,
}

/// Complete database health check result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseHealth {
    pub status: DBHealthStatus,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Database {
    /// Create a new database connection pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        info!("Initializing database connection");
        debug!(
            "Database configuration: max_conn={}, min_conn={}, timeout={}s",
            config.max_connections, config.min_connections, config.connect_timeout_seconds
        );

        if !config.skip_db_exists_check {
            Self::ensure_database_exists(config).await?;
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                DatabaseError::ConnectionError(e)
            })?;

        info!("Successfully connected to database");

        let db = Self { pool };
        if config.create_schema {
            db.ensure_schema().await?;
        }

        Ok(db)
    }

    /// Wrap an already configured pool, skipping existence checks and schema setup
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `urls` table unless it is already there.
    pub async fn ensure_schema(&self) -> DbResult<()> {
        let (existing,): (Option<String>,) = sqlx::query_as("SELECT to_regclass($1)::text")
            .bind(URLS_TABLE)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::SchemaError(e.to_string()))?;

        if existing.is_some() {
            debug!("Table \"{}\" already exists", URLS_TABLE);
            return Ok(());
        }

        sqlx::query(CREATE_URLS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!("Failed to create table \"{}\": {}", URLS_TABLE, e);
                DatabaseError::SchemaError(e.to_string())
            })?;

        info!("Table \"{}\" created", URLS_TABLE);
        Ok(())
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> DatabaseHealth {
        let start = Instant::now();

        let result = sqlx::query("SELECT 1").execute(&self.pool).await;
        let response_time_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => DatabaseHealth {
                status: DBHealthStatus::Healthy,
                response_time_ms,
                message: None,
            },
            Err(e) => DatabaseHealth {
                status: DBHealthStatus::Unhealthy,
                response_time_ms,
                message: Some(format!("Database query failed: {}", e)),
            },
        }
    }

    /// Ensure the target database exists, create it if necessary
    async fn ensure_database_exists(config: &DatabaseConfig) -> DbResult<()> {
        let url = &config.url;
        let db_name = extract_db_name_from_url(url).ok_or_else(|| {
            DatabaseError::DatabaseNotFound(
                "Could not extract database name from connection string".to_string(),
            )
        })?;

        debug!("Checking if database '{}' exists", db_name);

        if Postgres::database_exists(url).await? {
            debug!("Database '{}' exists", db_name);
            return Ok(());
        }

        if !config.create_database_if_missing {
            return Err(DatabaseError::DatabaseNotFound(format!(
                "Database '{}' does not exist",
                db_name
            )));
        }

        info!("Database '{}' does not exist, creating it", db_name);
        Postgres::create_database(url).await.map_err(|err| {
            DatabaseError::DatabaseCreationFailed(format!(
                "Failed to create database '{}': {}",
                db_name, err
            ))
        })?;

        info!("Successfully created database '{}'", db_name);
        Ok(())
    }

    /// Gracefully close the database connection pool
    pub async fn shutdown(&self) {
        info!("Shutting down database connection pool...");

        let used_connections = self.pool.size();
        let idle_connections = self.pool.num_idle();

        self.pool.close().await;

        info!(
            "Database connection pool closed ({} open, {} idle released)",
            used_connections, idle_connections
        );
    }
}

/// Extract the database name from a PostgreSQL connection string
fn extract_db_name_from_url(url: &str) -> Option<String> {
    // scheme://authority/dbname?params
    let (_, rest) = url.split_once("://")?;
    let (_, path) = rest.split_once('/')?;
    let name = path.split(['?', '/']).next()?;

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
