//! # Beers Repository
//!
//! Concrete repository implementations (adapters) for the beer catalog.
//! Every adapter implements the `BeerRepository` port; [`Repo`] picks one at
//! runtime from a [`StorageKind`].
//!
//! The in-memory adapter is always compiled. The SQL adapters sit behind the
//! `postgres` and `sqlite` features.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use beers_types::{Beer, BeerId, BeerRepository, RepoError};

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "postgres", feature = "sqlite"))]
mod types;


pub use memory::InMemoryRepo;
#[cfg(feature = "postgres")]
pub use postgres::PostgresRepo;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepo;

// ─────────────────────────────────────────────────────────────────────────────
// Storage selection
// ─────────────────────────────────────────────────────────────────────────────

/// Storage backend named by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    #[default]
    InMemory,
    Postgres,
    Sqlite,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inmemory" | "memory" => Ok(StorageKind::InMemory),
            "postgres" | "postgresql" => Ok(StorageKind::Postgres),
            "sqlite" => Ok(StorageKind::Sqlite),
            other => Err(format!(
                "unknown storage type '{other}' (expected inmemory, postgres or sqlite)"
            )),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageKind::InMemory => "inmemory",
            StorageKind::Postgres => "postgres",
            StorageKind::Sqlite => "sqlite",
        };
        f.write_str(name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unified repository
// ─────────────────────────────────────────────────────────────────────────────

/// Repository chosen at startup.
pub enum Repo {
    InMemory(InMemoryRepo),
    #[cfg(feature = "postgres")]
    Postgres(PostgresRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteRepo),
}

impl Repo {
    pub fn kind(&self) -> StorageKind {
        match self {
            Repo::InMemory(_) => StorageKind::InMemory,
            #[cfg(feature = "postgres")]
            Repo::Postgres(_) => StorageKind::Postgres,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite(_) => StorageKind::Sqlite,
        }
    }
}

/// Build and initialize a repository.
///
/// SQL backends connect, run their migration and require `database_url`.
/// Asking for a backend whose feature was not compiled in is an error.
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo(StorageKind::InMemory, None).await?;
/// let repo = build_repo(StorageKind::Sqlite, Some("sqlite://data/beers.db")).await?;
/// ```
pub async fn build_repo(kind: StorageKind, database_url: Option<&str>) -> anyhow::Result<Repo> {
    let repo = match kind {
        StorageKind::InMemory => Repo::InMemory(InMemoryRepo::new()),
        StorageKind::Postgres => connect_postgres(require_url(kind, database_url)?).await?,
        StorageKind::Sqlite => connect_sqlite(require_url(kind, database_url)?).await?,
    };
    tracing::info!(storage = %kind, "repository initialized");
    Ok(repo)
}

fn require_url(kind: StorageKind, database_url: Option<&str>) -> anyhow::Result<&str> {
    match database_url.map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url),
        _ => anyhow::bail!("DATABASE_URL is required for {kind} storage"),
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(url: &str) -> anyhow::Result<Repo> {
    Ok(Repo::Postgres(PostgresRepo::new(url).await?))
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(_url: &str) -> anyhow::Result<Repo> {
    anyhow::bail!("postgres storage requested but the `postgres` feature is not enabled")
}

#[cfg(feature = "sqlite")]
async fn connect_sqlite(url: &str) -> anyhow::Result<Repo> {
    Ok(Repo::Sqlite(SqliteRepo::new(url).await?))
}

#[cfg(not(feature = "sqlite"))]
async fn connect_sqlite(_url: &str) -> anyhow::Result<Repo> {
    anyhow::bail!("sqlite storage requested but the `sqlite` feature is not enabled")
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement BeerRepository for Repo (delegation)
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! delegate {
    ($self:ident, $repo:ident => $call:expr) => {
        match $self {
            Repo::InMemory($repo) => $call,
            #[cfg(feature = "postgres")]
            Repo::Postgres($repo) => $call,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite($repo) => $call,
        }
    };
}

#[async_trait]
impl BeerRepository for Repo {
    async fn save(&self, beer: &Beer) -> Result<(), RepoError> {
        delegate!(self, r => r.save(beer).await)
    }

    async fn find_by_id(&self, id: BeerId) -> Result<Beer, RepoError> {
        delegate!(self, r => r.find_by_id(id).await)
    }

    async fn find_all(&self) -> Result<Vec<Beer>, RepoError> {
        delegate!(self, r => r.find_all().await)
    }

    async fn exists_by_id(&self, id: BeerId) -> Result<bool, RepoError> {
        delegate!(self, r => r.exists_by_id(id).await)
    }

    async fn close(&self) -> Result<(), RepoError> {
        delegate!(self, r => r.close().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_kind_parse() {
        assert_eq!("inmemory".parse(), Ok(StorageKind::InMemory));
        assert_eq!(" Postgres ".parse(), Ok(StorageKind::Postgres));
        assert_eq!("SQLITE".parse(), Ok(StorageKind::Sqlite));
        assert!("mongo".parse::<StorageKind>().is_err());
        assert_eq!(StorageKind::default().to_string(), "inmemory");
    }

    #[tokio::test]
    async fn test_build_in_memory() {
        let repo = build_repo(StorageKind::InMemory, None).await.unwrap();
        assert_eq!(repo.kind(), StorageKind::InMemory);

        let beer = Beer::new(BeerId::new(1), "Golden", "Kross", "Chile", 10.5, "EUR").unwrap();
        repo.save(&beer).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap(), vec![beer]);
        repo.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_sql_storage_requires_url() {
        let err = build_repo(StorageKind::Postgres, None).await.err().unwrap();
        assert!(err.to_string().contains("DATABASE_URL"));

        let err = build_repo(StorageKind::Sqlite, Some("  ")).await.err().unwrap();
        assert!(err.to_string().contains("DATABASE_URL"));
    }
}
