use std::{collections::HashMap, sync::RwLock};

use crate::{StateError, Store};

/// An in-memory store.
///
/// Holds the session-scoped state (dropped with the owning client, the
/// equivalent of browser session storage) and doubles as a test stand-in
/// for either side of the fallback chain.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StateError> {
        Ok(self
            .values
            .read()
            .expect("RwLock should not be poisoned")
            .get(key)
            .cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StateError> {
        self.values
            .write()
            .expect("RwLock should not be poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
