//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use beers_types::{Beer, BeerId, BeerRepository, RepoError};

use crate::types::{BEER_COLUMNS, DbBeer};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if !is_memory_url(database_url) {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every in-memory connection is its own database, so pin the pool to
        // a single connection that is never recycled.
        let pool = if is_memory_url(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };

        let repo = Self { pool };
        repo.create_schema().await?;
        tracing::info!("SQLite repository ready");
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (idempotent).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_beers.sql");
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl BeerRepository for SqliteRepo {
    async fn save(&self, beer: &Beer) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"INSERT INTO beers (id, name, brewery, country, price, currency, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT (id) DO NOTHING"#,
        )
        .bind(beer.id().value())
        .bind(beer.name())
        .bind(beer.brewery())
        .bind(beer.country())
        .bind(beer.price())
        .bind(beer.currency())
        .bind(beer.created_at())
        .bind(beer.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::Conflict(beer.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: BeerId) -> Result<Beer, RepoError> {
        let row: Option<DbBeer> =
            sqlx::query_as(&format!("SELECT {BEER_COLUMNS} FROM beers WHERE id = ?"))
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.ok_or(RepoError::NotFound(id))?.into_domain()
    }

    async fn find_all(&self) -> Result<Vec<Beer>, RepoError> {
        let rows: Vec<DbBeer> =
            sqlx::query_as(&format!("SELECT {BEER_COLUMNS} FROM beers ORDER BY id"))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbBeer::into_domain).collect()
    }

    async fn exists_by_id(&self, id: BeerId) -> Result<bool, RepoError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM beers WHERE id = ?")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;
        Ok(count > 0)
    }

    async fn close(&self) -> Result<(), RepoError> {
        self.pool.close().await;
        Ok(())
    }
}
