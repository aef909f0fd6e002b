use super::{StorageBackend, StoreError};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// File-backed store: one `<key>.json` file per key under a directory.
///
/// Writes replace the whole file. Concurrent writers from other processes
/// race (last write wins); that is an accepted limitation of the snapshot
/// model, not something this layer tries to solve.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        fs::write(&path, value)?;
        debug!(target: "storage", "wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert_eq!(store.get("mymanager_games").unwrap(), None);
        store.set("mymanager_games", "[1,2,3]").unwrap();
        assert_eq!(
            store.get("mymanager_games").unwrap(),
            Some("[1,2,3]".to_string())
        );
        assert!(dir.path().join("mymanager_games.json").exists());

        store.remove("mymanager_games").unwrap();
        assert_eq!(store.get("mymanager_games").unwrap(), None);
        store.remove("mymanager_games").unwrap();
    }
}
