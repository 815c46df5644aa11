//! File-backed identity snapshot storage.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::debug;

use gangway_core::error::{Error, StorageError};
use gangway_core::{Identity, IdentityStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Identity store backed by a JSON file on disk.
///
/// Survives process restarts, unlike the session handle. Only the identity
/// snapshot is written here; session secrets never touch the filesystem.
#[derive(Debug)]
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    /// Create a store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the platform data directory
    /// (e.g. `~/.local/share/gangway/identity.json` on Linux).
    pub fn at_default_location() -> Result<Self, Error> {
        let dirs = ProjectDirs::from("", "", "gangway").ok_or(StorageError::NoDataDir)?;

        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir).map_err(StorageError::from)?;

        Ok(Self::new(data_dir.join("identity.json")))
    }

    /// Returns the path the snapshot is stored at.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> Result<Option<Identity>, Error> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).map_err(StorageError::from)?;
        let identity = serde_json::from_str(&json).map_err(StorageError::from)?;
        Ok(Some(identity))
    }

    fn save(&self, identity: &Identity) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(identity).map_err(StorageError::from)?;
        fs::write(&self.path, &json).map_err(StorageError::from)?;

        // Restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&self.path)
                .map_err(StorageError::from)?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms).map_err(StorageError::from)?;
        }

        debug!(path = %self.path.display(), "Saved identity snapshot");
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(StorageError::from)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn identity() -> Identity {
        Identity::from_account(json!({"$id": "user-1", "name": "Jane"})).unwrap()
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileIdentityStore::new(dir.path().join("identity.json"));

        assert!(store.load().unwrap().is_none());

        store.save(&identity()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.id, "user-1");
        assert_eq!(loaded.full_name.as_deref(), Some("Jane"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileIdentityStore::new(dir.path().join("identity.json"));
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn snapshot_file_is_owner_only() {
        let dir = tempdir().unwrap();
        let store = FileIdentityStore::new(dir.path().join("identity.json"));
        store.save(&identity()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("identity.json");
        fs::write(&path, "not json").unwrap();

        let store = FileIdentityStore::new(path);
        assert!(store.load().is_err());
    }
}
