//! In-memory repository adapter.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;

use beers_types::{Beer, BeerId, BeerRepository, RepoError};

/// Process-local store guarded by a readers-writer lock.
///
/// Values are cloned on the way in and out, so callers never hold a
/// reference into the map.
#[derive(Default)]
pub struct InMemoryRepo {
    beers: RwLock<HashMap<BeerId, Beer>>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored beers.
    pub async fn len(&self) -> usize {
        self.beers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.beers.read().await.is_empty()
    }
}

#[async_trait]
impl BeerRepository for InMemoryRepo {
    async fn save(&self, beer: &Beer) -> Result<(), RepoError> {
        let mut beers = self.beers.write().await;
        match beers.entry(beer.id()) {
            Entry::Occupied(_) => Err(RepoError::Conflict(beer.id())),
            Entry::Vacant(slot) => {
                slot.insert(beer.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: BeerId) -> Result<Beer, RepoError> {
        self.beers
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound(id))
    }

    async fn find_all(&self) -> Result<Vec<Beer>, RepoError> {
        let mut beers: Vec<Beer> = self.beers.read().await.values().cloned().collect();
        beers.sort_by_key(|b| b.id());
        Ok(beers)
    }

    async fn exists_by_id(&self, id: BeerId) -> Result<bool, RepoError> {
        Ok(self.beers.read().await.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use beers_types::BeerChanges;

    use super::*;

    fn beer(id: i64, name: &str) -> Beer {
        Beer::new(BeerId::new(id), name, "Kross", "Chile", 10.5, "EUR").unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryRepo::new();
        let golden = beer(1, "Golden");

        repo.save(&golden).await.unwrap();

        let found = repo.find_by_id(BeerId::new(1)).await.unwrap();
        assert_eq!(found, golden);
        assert!(repo.exists_by_id(BeerId::new(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = InMemoryRepo::new();

        let err = repo.find_by_id(BeerId::new(42)).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(id) if id.value() == 42));
        assert!(!repo.exists_by_id(BeerId::new(42)).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let repo = InMemoryRepo::new();
        repo.save(&beer(1, "Golden")).await.unwrap();

        let err = repo.save(&beer(1, "Stout")).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict(id) if id.value() == 1));

        // First write is kept
        let stored = repo.find_by_id(BeerId::new(1)).await.unwrap();
        assert_eq!(stored.name(), "Golden");
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_id() {
        let repo = InMemoryRepo::new();
        assert!(repo.find_all().await.unwrap().is_empty());

        for id in [3, 1, 2] {
            repo.save(&beer(id, &format!("Beer {id}"))).await.unwrap();
        }

        let ids: Vec<i64> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|b| b.id().value())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(repo.len().await, 3);
    }

    #[tokio::test]
    async fn test_returned_values_are_copies() {
        let repo = InMemoryRepo::new();
        repo.save(&beer(1, "Golden")).await.unwrap();

        let mut copy = repo.find_by_id(BeerId::new(1)).await.unwrap();
        copy.update(BeerChanges {
            name: "Renamed".into(),
            brewery: "Kross".into(),
            country: "Chile".into(),
            price: 99.0,
            currency: "USD".into(),
        })
        .unwrap();

        let stored = repo.find_by_id(BeerId::new(1)).await.unwrap();
        assert_eq!(stored.name(), "Golden");
        assert_eq!(stored.price(), 10.5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_single_winner() {
        let repo = Arc::new(InMemoryRepo::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.save(&beer(7, &format!("Contender {i}"))).await })
            })
            .collect();

        let mut wins = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => wins += 1,
                Err(RepoError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(wins, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(repo.len().await, 1);
    }
}
