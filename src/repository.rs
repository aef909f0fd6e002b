//! CRUD boundary over one entity's persisted collection.
//!
//! Every write replaces the whole collection snapshot in the backing
//! store, so readers in this process never see a half-applied change.
//! Collections are seeded with default records the first time they are
//! read and the key is absent.

use std::marker::PhantomData;
use std::sync::Arc;
use std::thread;

use thiserror::Error;
use tracing::{debug, info};

use crate::deferred::Deferred;
use crate::models::{Entity, RecordId};
use crate::storage::{StorageBackend, StoreError};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: RecordId },
    #[error("{entity} id {id} appears more than once")]
    DuplicateId { entity: &'static str, id: RecordId },
    #[error("collection snapshot {key} could not be decoded: {source}")]
    Snapshot {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A collection load that may still be in flight.
pub type Load<T> = Deferred<T, RepoError>;

pub struct Repository<T: Entity> {
    backend: Arc<dyn StorageBackend>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Repository {
            backend: Arc::clone(&self.backend),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Repository {
            backend,
            _entity: PhantomData,
        }
    }

    /// Full collection in storage order.
    pub fn get_all(&self) -> Result<Vec<T>, RepoError> {
        self.load()
    }

    /// Starts a collection read on a worker thread. Callers poll the
    /// returned handle and must re-check their own liveness before
    /// applying a result that arrives after they were torn down.
    pub fn load_all(&self) -> Load<Vec<T>> {
        let (deferred, resolver) = Deferred::pending();
        let repo = self.clone();
        thread::spawn(move || resolver.resolve(repo.get_all()));
        deferred
    }

    /// Linear scan; absence is not an error.
    pub fn get_by_id(&self, id: RecordId) -> Result<Option<T>, RepoError> {
        Ok(self.load()?.into_iter().find(|record| record.id() == id))
    }

    /// Appends the draft with the next free id (`max + 1`, or 1 for an
    /// empty collection). Any id already on the draft is ignored.
    pub fn create(&self, mut draft: T) -> Result<T, RepoError> {
        let mut records = self.load()?;
        let id = records
            .iter()
            .map(Entity::id)
            .max()
            .map_or(1, |highest| highest + 1);
        draft.set_id(id);
        records.push(draft.clone());
        self.persist(&records)?;
        debug!(target: "repository", "created {} id={}", T::NAME, id);
        Ok(draft)
    }

    /// Replaces the record in place, keeping its position in the
    /// collection. The stored id always wins over whatever the form put
    /// on `data`.
    pub fn update(&self, id: RecordId, mut data: T) -> Result<T, RepoError> {
        let mut records = self.load()?;
        let Some(position) = records.iter().position(|record| record.id() == id) else {
            return Err(RepoError::NotFound {
                entity: T::NAME,
                id,
            });
        };
        data.set_id(id);
        records[position] = data.clone();
        self.persist(&records)?;
        debug!(target: "repository", "updated {} id={}", T::NAME, id);
        Ok(data)
    }

    /// Removes the record if present. Deleting an absent id succeeds,
    /// so repeating a delete is harmless.
    pub fn delete(&self, id: RecordId) -> Result<(), RepoError> {
        let mut records = self.load()?;
        records.retain(|record| record.id() != id);
        self.persist(&records)?;
        debug!(target: "repository", "deleted {} id={}", T::NAME, id);
        Ok(())
    }

    /// Swaps in a whole new collection, keeping the ids the records
    /// arrive with. Used by imports, where losing ids would break the
    /// references between collections.
    pub fn replace_all(&self, records: Vec<T>) -> Result<Vec<T>, RepoError> {
        let mut seen = std::collections::HashSet::new();
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(RepoError::DuplicateId {
                    entity: T::NAME,
                    id: record.id(),
                });
            }
        }
        self.persist(&records)?;
        info!(
            target: "repository",
            "replaced {} with {} records",
            T::STORE_KEY,
            records.len()
        );
        Ok(records)
    }

    fn load(&self) -> Result<Vec<T>, RepoError> {
        match self.backend.get(T::STORE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| RepoError::Snapshot {
                key: T::STORE_KEY,
                source,
            }),
            None => {
                let seeds = T::seed();
                info!(
                    target: "repository",
                    "seeding {} with {} default records",
                    T::STORE_KEY,
                    seeds.len()
                );
                self.persist(&seeds)?;
                Ok(seeds)
            }
        }
    }

    fn persist(&self, records: &[T]) -> Result<(), RepoError> {
        let raw = serde_json::to_string(records).map_err(|source| RepoError::Snapshot {
            key: T::STORE_KEY,
            source,
        })?;
        self.backend.set(T::STORE_KEY, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;
    use crate::storage::MemoryStore;
    use std::time::Duration;

    fn repo() -> Repository<Genre> {
        Repository::new(Arc::new(MemoryStore::new()))
    }

    fn genre(name: &str) -> Genre {
        Genre {
            id: 0,
            name: name.to_string(),
            description: String::new(),
        }
    }

    fn resolve<T>(load: Load<T>) -> Result<T, RepoError> {
        for _ in 0..400 {
            if let Some(result) = load.take() {
                return result;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("load never resolved");
    }

    #[test]
    fn test_absent_key_seeds_defaults() {
        let repo = repo();
        let all = repo.get_all().unwrap();
        assert_eq!(all, Genre::seed());
    }

    #[test]
    fn test_create_assigns_max_plus_one() {
        let repo = repo();
        let seeded_max = Genre::seed().iter().map(|g| g.id).max().unwrap();
        let created = repo.create(genre("Roguelike")).unwrap();
        assert_eq!(created.id, seeded_max + 1);
        assert_eq!(repo.get_by_id(created.id).unwrap(), Some(created));
    }

    #[test]
    fn test_create_on_empty_collection_starts_at_one() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(Genre::STORE_KEY, "[]").unwrap();
        let repo = Repository::<Genre>::new(backend);
        assert_eq!(repo.create(genre("Sandbox")).unwrap().id, 1);
    }

    #[test]
    fn test_create_ignores_id_on_draft() {
        let repo = repo();
        let mut draft = genre("Tactics");
        draft.id = 999;
        let created = repo.create(draft).unwrap();
        assert_ne!(created.id, 999);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let repo = repo();
        let mut replacement = genre("Role-playing");
        replacement.description = "Renamed".to_string();
        let updated = repo.update(1, replacement).unwrap();
        assert_eq!(updated.id, 1);

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].name, "Role-playing");
        assert_eq!(all.len(), Genre::seed().len());
    }

    #[test]
    fn test_update_missing_id_is_not_found_and_leaves_data_alone() {
        let repo = repo();
        let before = repo.get_all().unwrap();
        let err = repo.update(99, genre("Ghost")).unwrap_err();
        assert!(matches!(
            err,
            RepoError::NotFound { entity: "Genre", id: 99 }
        ));
        assert_eq!(repo.get_all().unwrap(), before);
    }

    #[test]
    fn test_delete_twice_is_idempotent() {
        let repo = repo();
        repo.delete(2).unwrap();
        let after_first = repo.get_all().unwrap();
        assert!(after_first.iter().all(|g| g.id != 2));

        repo.delete(2).unwrap();
        assert_eq!(repo.get_all().unwrap(), after_first);
    }

    #[test]
    fn test_writes_visible_through_shared_backend() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryStore::new());
        let writer = Repository::<Genre>::new(Arc::clone(&backend));
        let reader = Repository::<Genre>::new(backend);

        let created = writer.create(genre("Horror")).unwrap();
        assert_eq!(reader.get_by_id(created.id).unwrap(), Some(created));
    }

    #[test]
    fn test_replace_all_keeps_incoming_ids() {
        let repo = repo();
        let mut a = genre("Imported A");
        a.id = 10;
        let mut b = genre("Imported B");
        b.id = 4;
        repo.replace_all(vec![a, b]).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, 10);
        // Next create still picks max + 1 over the imported ids.
        assert_eq!(repo.create(genre("After")).unwrap().id, 11);
    }

    #[test]
    fn test_replace_all_rejects_duplicate_ids() {
        let repo = repo();
        let mut a = genre("A");
        a.id = 3;
        let mut b = genre("B");
        b.id = 3;
        let err = repo.replace_all(vec![a, b]).unwrap_err();
        assert!(matches!(err, RepoError::DuplicateId { id: 3, .. }));
    }

    #[test]
    fn test_corrupt_snapshot_surfaces_error() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(Genre::STORE_KEY, "{not json").unwrap();
        let repo = Repository::<Genre>::new(backend);
        assert!(matches!(
            repo.get_all().unwrap_err(),
            RepoError::Snapshot { key: "mymanager_genres", .. }
        ));
    }

    #[test]
    fn test_load_all_resolves_off_thread() {
        let repo = repo();
        let all = resolve(repo.load_all()).unwrap();
        assert_eq!(all, Genre::seed());
    }
}
