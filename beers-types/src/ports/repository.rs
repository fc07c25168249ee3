//! Repository port trait.
//!
//! Adapters (InMemory, Postgres, SQLite) implement this trait.

use crate::domain::{Beer, BeerId};
use crate::error::RepoError;

/// Persistence port for beers.
///
/// Records are copied in and out: mutating a returned `Beer` never affects
/// stored state until it is saved again.
#[async_trait::async_trait]
pub trait BeerRepository: Send + Sync + 'static {
    /// Inserts a new beer.
    ///
    /// Insert-only and atomic: fails with [`RepoError::Conflict`] when a beer
    /// with the same ID already exists, even under concurrent calls.
    async fn save(&self, beer: &Beer) -> Result<(), RepoError>;

    /// Gets a beer by ID, failing with [`RepoError::NotFound`] when absent.
    async fn find_by_id(&self, id: BeerId) -> Result<Beer, RepoError>;

    /// Lists all beers ordered by ID.
    async fn find_all(&self) -> Result<Vec<Beer>, RepoError>;

    /// Checks whether a beer with the given ID exists.
    async fn exists_by_id(&self, id: BeerId) -> Result<bool, RepoError>;

    /// Releases held resources. Called once during teardown.
    async fn close(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
