//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use beers_types::{Beer, BeerId, BeerRepository, RepoError};

use crate::types::{BEER_COLUMNS, DbBeer};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_beers_pg.sql"),
            "0001",
        )
        .await?;
        tracing::info!("PostgreSQL repository ready");
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BeerRepository for PostgresRepo {
    async fn save(&self, beer: &Beer) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"INSERT INTO beers (id, name, brewery, country, price, currency, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
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
            sqlx::query_as(&format!("SELECT {BEER_COLUMNS} FROM beers WHERE id = $1"))
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
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM beers WHERE id = $1)")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }

    async fn close(&self) -> Result<(), RepoError> {
        self.pool.close().await;
        Ok(())
    }
}
