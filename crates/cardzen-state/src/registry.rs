use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{Arc, RwLock},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::{SyncedCollection, SyncedItem, SyncedValue};

/// Caches synchronized state instances per item type and storage key, so
/// every sub-client handed out by one `Client` observes the same in-memory
/// copy instead of each fetching its own.
///
/// Keyed by `(TypeId, key)` because several collections can share a record
/// type (the three custom lists differ only by storage key).
pub struct StateRegistry {
    entries: RwLock<HashMap<(TypeId, String), Box<dyn Any + Send + Sync>>>,
}

impl std::fmt::Debug for StateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateRegistry").finish()
    }
}

impl StateRegistry {
    /// Creates an empty registry.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        StateRegistry {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the collection registered under `key`, creating it with
    /// `init` on first access.
    pub fn collection<T: SyncedItem>(
        &self,
        key: &str,
        init: impl FnOnce() -> SyncedCollection<T>,
    ) -> Arc<SyncedCollection<T>> {
        self.get_or_insert(key, || Arc::new(init()))
    }

    /// Returns the synced value registered under `key`, creating it with
    /// `init` on first access.
    pub fn value<T>(
        &self,
        key: &str,
        init: impl FnOnce() -> SyncedValue<T>,
    ) -> Arc<SyncedValue<T>>
    where
        T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        self.get_or_insert(key, || Arc::new(init()))
    }

    fn get_or_insert<V: Send + Sync + 'static>(
        &self,
        key: &str,
        init: impl FnOnce() -> Arc<V>,
    ) -> Arc<V> {
        let map_key = (TypeId::of::<V>(), key.to_string());

        if let Some(existing) = self
            .entries
            .read()
            .expect("RwLock should not be poisoned")
            .get(&map_key)
            .and_then(|boxed| boxed.downcast_ref::<Arc<V>>())
        {
            return Arc::clone(existing);
        }

        let mut entries = self.entries.write().expect("RwLock should not be poisoned");
        let entry = entries.entry(map_key).or_insert_with(|| Box::new(init()));
        entry
            .downcast_ref::<Arc<V>>()
            .map(Arc::clone)
            .expect("registry entry type matches its TypeId")
    }
}
