use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, RwLock,
    },
    time::{Duration, Instant},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::{StateError, Store};

/// A record type managed by a [`SyncedCollection`].
pub trait SyncedItem: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The record's unique id within its collection.
    fn id(&self) -> &str;

    /// Replaces the record's id. Called once, when [`SyncedCollection::add`]
    /// assigns the freshly generated id.
    fn set_id(&mut self, id: String);

    /// Normalizes a raw stored record into the current schema.
    ///
    /// Must be total and idempotent: malformed input is repaired or passed
    /// through, never rejected, and re-migrating migrated output is a no-op.
    fn migrate(raw: serde_json::Value) -> serde_json::Value {
        raw
    }
}

/// Where a load ultimately got its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// The primary (network) backend answered.
    Primary,
    /// The primary failed or had no value; the local fallback answered.
    Fallback,
    /// Neither store had a usable value; the default was substituted.
    Default,
}

/// How far a save made it down the persistence chain.
///
/// The in-memory state is always replaced first, so even `MemoryOnly`
/// leaves the current session consistent with what the caller wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    /// The primary backend accepted the write.
    Durable,
    /// Only the local fallback accepted the write.
    FallbackOnly,
    /// Every store rejected the write; the next successful save or load is
    /// the recovery point.
    MemoryOnly,
}

/// Outcome of a coalesced [`SyncedCollection::refresh`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// A load ran to completion.
    Refreshed(DataSource),
    /// Another load was in flight, or one completed within the cooldown
    /// window.
    Skipped,
}

/// Default window during which repeated refresh calls coalesce into no-ops.
pub const DEFAULT_REFRESH_COOLDOWN: Duration = Duration::from_secs(2);

/// Configuration for one synchronized collection or value: which stores back
/// it, under which key, and how aggressively refreshes are coalesced.
pub struct SyncConfig {
    /// The network-backed store tried first on load and written first on
    /// save. `None` makes the state local-only.
    pub primary: Option<Arc<dyn Store>>,
    /// The always-available local store: written on every save and read when
    /// the primary cannot serve.
    pub secondary: Arc<dyn Store>,
    /// The namespaced storage key, doubling as the REST resource path on the
    /// primary backend.
    pub key: String,
    /// Cooldown applied to refresh coalescing.
    pub cooldown: Duration,
}

impl SyncConfig {
    /// A config with the standard primary-then-fallback chain.
    pub fn new(
        primary: Arc<dyn Store>,
        secondary: Arc<dyn Store>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            primary: Some(primary),
            secondary,
            key: key.into(),
            cooldown: DEFAULT_REFRESH_COOLDOWN,
        }
    }

    /// A config whose state never leaves the local store.
    pub fn local_only(secondary: Arc<dyn Store>, key: impl Into<String>) -> Self {
        Self {
            primary: None,
            secondary,
            key: key.into(),
            cooldown: DEFAULT_REFRESH_COOLDOWN,
        }
    }

    /// Overrides the refresh cooldown.
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }
}

/// The generalized synchronization pattern behind every entity collection:
/// an optimistic in-memory copy, a primary-then-fallback load chain, dual
/// writes on save, and schema migration applied to whatever was read.
///
/// Backend failures never surface to callers as errors. A failed load
/// degrades down the chain to the default; a failed save leaves the
/// in-memory state authoritative for the rest of the session. Durability is
/// best-effort by design.
pub struct SyncedCollection<T: SyncedItem> {
    config: SyncConfig,
    records: RwLock<Vec<T>>,
    loaded: AtomicBool,
    // Serializes loads; carries the completion time of the last one for
    // refresh coalescing.
    load_gate: tokio::sync::Mutex<Option<Instant>>,
}

impl<T: SyncedItem> SyncedCollection<T> {
    /// Creates an empty, not-yet-loaded collection.
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            records: RwLock::new(Vec::new()),
            loaded: AtomicBool::new(false),
            load_gate: tokio::sync::Mutex::new(None),
        }
    }

    /// Current in-memory snapshot.
    pub fn records(&self) -> Vec<T> {
        self.records
            .read()
            .expect("RwLock should not be poisoned")
            .clone()
    }

    /// Whether at least one load cycle has completed, successfully or not.
    /// Lets callers tell "still loading" from "loaded but empty".
    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Loads the collection: primary store first, local fallback on any
    /// failure or absence, empty default when both fail. Marks the
    /// collection loaded on every path.
    pub async fn load(&self) -> DataSource {
        let mut gate = self.load_gate.lock().await;
        let source = self.load_inner().await;
        *gate = Some(Instant::now());
        source
    }

    /// Re-runs the load to pick up changes made by another session.
    ///
    /// Calls are coalesced: at most one load in flight, and a call landing
    /// while one is running or within the cooldown of the last completed one
    /// is a no-op.
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

    /// Replaces the collection and persists it: the in-memory copy
    /// synchronously, then the primary store, then the local store as a
    /// durability backstop regardless of the primary's outcome. Write
    /// failures are logged and reflected in the returned [`Durability`],
    /// never raised.
    pub async fn save(&self, records: Vec<T>) -> Durability {
        self.replace(records);
        self.persist().await
    }

    /// Appends `record` under a freshly generated id and persists.
    ///
    /// The record is returned with its id immediately; durability is not
    /// guaranteed at return time.
    pub async fn add(&self, mut record: T) -> T {
        record.set_id(Uuid::new_v4().to_string());
        let mut records = self.records();
        records.push(record.clone());
        self.save(records).await;
        record
    }

    /// Replaces the record whose id matches. An unknown id leaves the
    /// collection unchanged; the collection is persisted either way.
    pub async fn update(&self, record: T) -> Durability {
        let mut records = self.records();
        if let Some(slot) = records.iter_mut().find(|r| r.id() == record.id()) {
            *slot = record;
        }
        self.save(records).await
    }

    /// Removes the record with the matching id. Removing an id that does
    /// not exist leaves the collection unchanged.
    pub async fn delete(&self, id: &str) -> Durability {
        let mut records = self.records();
        records.retain(|r| r.id() != id);
        self.save(records).await
    }

    fn replace(&self, records: Vec<T>) {
        *self.records.write().expect("RwLock should not be poisoned") = records;
    }

    async fn load_inner(&self) -> DataSource {
        let source = self.try_load().await;
        self.loaded.store(true, Ordering::Release);
        source
    }

    async fn try_load(&self) -> DataSource {
        if let Some(primary) = &self.config.primary {
            if let Some(records) = self.read_store(primary.as_ref()).await {
                self.replace(records);
                return DataSource::Primary;
            }
        }

        if let Some(records) = self.read_store(self.config.secondary.as_ref()).await {
            self.replace(records);
            return DataSource::Fallback;
        }

        self.replace(Vec::new());
        DataSource::Default
    }

    async fn read_store(&self, store: &dyn Store) -> Option<Vec<T>> {
        match store.read(&self.config.key).await {
            Ok(Some(payload)) => match Self::parse_records(&payload) {
                Ok(records) => Some(records),
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

    fn parse_records(payload: &str) -> Result<Vec<T>, StateError> {
        let raw: Vec<serde_json::Value> = serde_json::from_str(payload)?;
        let records = raw
            .into_iter()
            .map(|value| serde_json::from_value(T::migrate(value)))
            .collect::<Result<_, _>>()?;
        Ok(records)
    }

    async fn persist(&self) -> Durability {
        let payload = {
            let records = self.records.read().expect("RwLock should not be poisoned");
            match serde_json::to_string(&*records) {
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

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde::Deserialize;

    use super::*;
    use crate::MemoryStore;

    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
    struct TestItem {
        id: String,
        name: String,
    }

    impl TestItem {
        fn named(name: &str) -> Self {
            Self {
                id: String::new(),
                name: name.to_string(),
            }
        }
    }

    impl SyncedItem for TestItem {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }

        fn migrate(mut raw: serde_json::Value) -> serde_json::Value {
            // Legacy records stored the name under "label".
            if let Some(object) = raw.as_object_mut() {
                if let Some(label) = object.remove("label") {
                    object.entry("name").or_insert(label);
                }
            }
            raw
        }
    }

    struct FailingStore;

    #[async_trait::async_trait]
    impl Store for FailingStore {
        async fn read(&self, _key: &str) -> Result<Option<String>, StateError> {
            Err(StateError::TransientIo("store is down".into()))
        }

        async fn write(&self, _key: &str, _value: &str) -> Result<(), StateError> {
            Err(StateError::TransientIo("store is down".into()))
        }
    }

    fn new_collection(primary: Arc<dyn Store>, secondary: Arc<dyn Store>) -> SyncedCollection<TestItem> {
        SyncedCollection::new(
            SyncConfig::new(primary, secondary, "test-items").with_cooldown(Duration::ZERO),
        )
    }

    #[tokio::test]
    async fn load_prefers_primary() {
        let primary = Arc::new(MemoryStore::new());
        let secondary = Arc::new(MemoryStore::new());
        primary
            .write("test-items", r#"[{"id":"a","name":"from primary"}]"#)
            .await
            .unwrap();
        secondary
            .write("test-items", r#"[{"id":"a","name":"from fallback"}]"#)
            .await
            .unwrap();

        let collection = new_collection(primary, secondary);
        assert!(!collection.is_loaded());

        let source = collection.load().await;
        assert_eq!(source, DataSource::Primary);
        assert!(collection.is_loaded());
        assert_eq!(collection.records()[0].name, "from primary");
    }

    #[tokio::test]
    async fn load_falls_back_when_primary_fails() {
        let secondary = Arc::new(MemoryStore::new());
        secondary
            .write("test-items", r#"[{"id":"a","name":"survivor"}]"#)
            .await
            .unwrap();

        let collection = new_collection(Arc::new(FailingStore), secondary);
        let source = collection.load().await;

        assert_eq!(source, DataSource::Fallback);
        assert_eq!(collection.records()[0].name, "survivor");
    }

    #[tokio::test]
    async fn load_defaults_to_empty_when_both_fail() {
        let collection = new_collection(Arc::new(FailingStore), Arc::new(FailingStore));
        let source = collection.load().await;

        assert_eq!(source, DataSource::Default);
        assert!(collection.records().is_empty());
        assert!(collection.is_loaded());
    }

    #[tokio::test]
    async fn malformed_primary_payload_degrades_to_fallback() {
        let primary = Arc::new(MemoryStore::new());
        let secondary = Arc::new(MemoryStore::new());
        primary.write("test-items", "{not json").await.unwrap();
        secondary
            .write("test-items", r#"[{"id":"a","name":"clean"}]"#)
            .await
            .unwrap();

        let collection = new_collection(primary, secondary);
        assert_eq!(collection.load().await, DataSource::Fallback);
        assert_eq!(collection.records()[0].name, "clean");
    }

    #[tokio::test]
    async fn migration_applies_on_load() {
        let secondary = Arc::new(MemoryStore::new());
        secondary
            .write("test-items", r#"[{"id":"a","label":"renamed"}]"#)
            .await
            .unwrap();

        let collection = new_collection(Arc::new(FailingStore), secondary);
        collection.load().await;
        assert_eq!(collection.records()[0].name, "renamed");
    }

    #[tokio::test]
    async fn add_assigns_unique_ids_and_round_trips() {
        let primary = Arc::new(MemoryStore::new());
        let secondary = Arc::new(MemoryStore::new());
        let collection = new_collection(primary.clone(), secondary.clone());
        collection.load().await;

        let first = collection.add(TestItem::named("groceries")).await;
        let second = collection.add(TestItem::named("travel")).await;
        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);

        // A second session against the same stores sees the persisted records.
        let other = new_collection(primary, secondary);
        other.load().await;
        let ids: HashSet<_> = other.records().iter().map(|r| r.id.clone()).collect();
        assert!(ids.contains(&first.id) && ids.contains(&second.id));
    }

    #[tokio::test]
    async fn save_reports_how_far_the_write_got() {
        let working = Arc::new(MemoryStore::new());

        let durable = new_collection(working.clone(), Arc::new(MemoryStore::new()));
        assert_eq!(durable.save(vec![TestItem::named("x")]).await, Durability::Durable);

        let degraded = new_collection(Arc::new(FailingStore), working.clone());
        assert_eq!(
            degraded.save(vec![TestItem::named("x")]).await,
            Durability::FallbackOnly
        );

        let stranded = new_collection(Arc::new(FailingStore), Arc::new(FailingStore));
        assert_eq!(
            stranded.save(vec![TestItem::named("x")]).await,
            Durability::MemoryOnly
        );
        // The optimistic update still happened.
        assert_eq!(stranded.records().len(), 1);
    }

    #[tokio::test]
    async fn update_with_unknown_id_leaves_collection_unchanged() {
        let collection = new_collection(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()));
        let added = collection.add(TestItem::named("original")).await;

        let mut stranger = TestItem::named("imposter");
        stranger.id = "no-such-id".to_string();
        collection.update(stranger).await;

        let records = collection.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], added);
    }

    #[tokio::test]
    async fn delete_nonexistent_id_is_a_noop() {
        let collection = new_collection(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()));
        let added = collection.add(TestItem::named("keeper")).await;

        collection.delete("no-such-id").await;
        assert_eq!(collection.records(), vec![added]);
    }

    #[tokio::test]
    async fn refresh_coalesces_within_cooldown() {
        let secondary = Arc::new(MemoryStore::new());
        let collection = SyncedCollection::<TestItem>::new(
            SyncConfig::local_only(secondary, "test-items")
                .with_cooldown(Duration::from_secs(60)),
        );

        collection.load().await;
        assert_eq!(collection.refresh().await, Refresh::Skipped);
    }

    #[tokio::test]
    async fn refresh_runs_after_cooldown() {
        let collection = new_collection(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()));
        collection.load().await;
        assert!(matches!(collection.refresh().await, Refresh::Refreshed(_)));
    }
}
