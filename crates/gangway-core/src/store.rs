//! Identity snapshot storage.

use std::sync::Mutex;

use crate::error::Error;
use crate::identity::Identity;

/// Persistent storage for the current identity snapshot.
///
/// The auth provider owns exactly one store instance; all snapshot reads
/// and writes go through it, so multiple adapter instances (e.g. in tests)
/// never share state through a module-level singleton.
pub trait IdentityStore: Send + Sync {
    /// Load the stored snapshot, if any.
    fn load(&self) -> Result<Option<Identity>, Error>;

    /// Replace the stored snapshot.
    fn save(&self, identity: &Identity) -> Result<(), Error>;

    /// Remove the stored snapshot. Removing an absent snapshot is not an
    /// error.
    fn clear(&self) -> Result<(), Error>;
}

/// In-memory identity store. Process-local; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    slot: Mutex<Option<Identity>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Result<Option<Identity>, Error> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn save(&self, identity: &Identity) -> Result<(), Error> {
        *self.slot.lock().unwrap() = Some(identity.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identity() -> Identity {
        Identity::from_account(json!({"$id": "user-1", "name": "Jane"})).unwrap()
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryIdentityStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&identity()).unwrap();
        assert_eq!(store.load().unwrap().unwrap().id, "user-1");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = MemoryIdentityStore::new();
        store.clear().unwrap();
        store.clear().unwrap();
    }
}
