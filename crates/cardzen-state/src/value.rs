use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        RwLock,
    },
    time::Instant,
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::{
    synced::{DataSource, Durability, Refresh, SyncConfig},
    StateError,
};

/// A single synchronized value: the scalar twin of
/// [`crate::SyncedCollection`], used for settings-shaped state (safe-spend
/// percentage, alert days, user profile, security settings).
///
/// Same contract: a configured default substitutes for absent or malformed
/// payloads, loads walk the primary-then-fallback chain, writes are
/// optimistic in memory and best-effort to the stores.
pub struct SyncedValue<T> {
    config: SyncConfig,
    default: T,
    value: RwLock<T>,
    loaded: AtomicBool,
    load_gate: tokio::sync::Mutex<Option<Instant>>,
    migrate: fn(serde_json::Value) -> serde_json::Value,
}

impl<T> SyncedValue<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Creates a value holding `default` until the first load.
    pub fn new(config: SyncConfig, default: T) -> Self {
        Self {
            config,
            value: RwLock::new(default.clone()),
            default,
            loaded: AtomicBool::new(false),
            load_gate: tokio::sync::Mutex::new(None),
            migrate: std::convert::identity,
        }
    }

    /// Installs a migration hook applied to the raw payload before
    /// deserialization. Must be total and idempotent.
    pub fn with_migration(mut self, migrate: fn(serde_json::Value) -> serde_json::Value) -> Self {
        self.migrate = migrate;
        self
    }

    /// Current in-memory value.
    pub fn get(&self) -> T {
        self.value
            .read()
            .expect("RwLock should not be poisoned")
            .clone()
    }

    /// Whether at least one load cycle has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Loads the value through the fallback chain; substitutes the default
    /// when no store has a usable payload.
    pub async fn load(&self) -> DataSource {
        let mut gate = self.load_gate.lock().await;
        let source = self.load_inner().await;
        *gate = Some(Instant::now());
        source
    }

    /// Coalesced re-load, mirroring [`crate::SyncedCollection::refresh`].
    pub async fn refresh(&self) -> Refresh {
        let Ok(mut gate) = self.load_gate.try_lock() else {
            return Refresh::Skipped;
        };
        if let Some(completed) = *gate {
            if completed.elapsed() < self.config.cooldown {
                return Refresh::Skipped;
            }
        }
        let source = self.load_inner().await;
        *gate = Some(Instant::now());
        Refresh::Refreshed(source)
    }

    /// Replaces the value and persists it down the chain. Failures are
    /// logged, never raised; the in-memory value is already updated when
    /// this returns.
    pub async fn set(&self, value: T) -> Durability {
        *self.value.write().expect("RwLock should not be poisoned") = value;
        self.persist().await
    }

    async fn load_inner(&self) -> DataSource {
        let source = self.try_load().await;
        self.loaded.store(true, Ordering::Release);
        source
    }

    async fn try_load(&self) -> DataSource {
        if let Some(primary) = &self.config.primary {
            if let Some(value) = self.read_store(primary.as_ref()).await {
                *self.value.write().expect("RwLock should not be poisoned") = value;
                return DataSource::Primary;
            }
        }

        if let Some(value) = self.read_store(self.config.secondary.as_ref()).await {
            *self.value.write().expect("RwLock should not be poisoned") = value;
            return DataSource::Fallback;
        }

        *self.value.write().expect("RwLock should not be poisoned") = self.default.clone();
        DataSource::Default
    }

    async fn read_store(&self, store: &dyn crate::Store) -> Option<T> {
        match store.read(&self.config.key).await {
            Ok(Some(payload)) => match self.parse(&payload) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key = %self.config.key, error = %e, "discarding malformed stored payload");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = %self.config.key, error = %e, "store read failed");
                None
            }
        }
    }

    fn parse(&self, payload: &str) -> Result<T, StateError> {
        let raw: serde_json::Value = serde_json::from_str(payload)?;
        Ok(serde_json::from_value((self.migrate)(raw))?)
    }

    async fn persist(&self) -> Durability {
        let payload = {
            let value = self.value.read().expect("RwLock should not be poisoned");
            match serde_json::to_string(&*value) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(key = %self.config.key, error = %e, "serialization failed, keeping in-memory state only");
                    return Durability::MemoryOnly;
                }
            }
        };

        let mut durability = Durability::MemoryOnly;
        if let Some(primary) = &self.config.primary {
            match primary.write(&self.config.key, &payload).await {
                Ok(()) => durability = Durability::Durable,
                Err(e) => {
                    warn!(key = %self.config.key, error = %e, "primary save failed, falling back to local store")
                }
            }
        }

        match self.config.secondary.write(&self.config.key, &payload).await {
            Ok(()) => {
                if durability == Durability::MemoryOnly {
                    durability = Durability::FallbackOnly;
                }
            }
            Err(e) => warn!(key = %self.config.key, error = %e, "local save failed"),
        }

        durability
    }
}
