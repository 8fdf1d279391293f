use std::sync::Arc;

use cardzen_core::{keys, Client};
use cardzen_state::{
    DataSource, Durability, Refresh, StateError, SyncConfig, SyncedCollection, SyncedItem,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An entry in one of the user-editable lists backing the card form's
/// provider, network and perk pickers.
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomListItem {
    pub id: String,
    pub name: String,
}

impl SyncedItem for CustomListItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// The three custom lists. They share one record shape and differ only by
/// storage key and seeded defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomListKind {
    #[allow(missing_docs)]
    Provider,
    #[allow(missing_docs)]
    Network,
    #[allow(missing_docs)]
    Perk,
}

impl CustomListKind {
    fn key(self) -> &'static str {
        match self {
            CustomListKind::Provider => keys::PROVIDERS,
            CustomListKind::Network => keys::NETWORKS,
            CustomListKind::Perk => keys::PERKS,
        }
    }

    /// Entries seeded on first use, when no store has a value yet.
    fn default_items(self) -> Vec<CustomListItem> {
        fn seeded(entries: &[(&str, &str)]) -> Vec<CustomListItem> {
            entries
                .iter()
                .map(|(id, name)| CustomListItem {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                })
                .collect()
        }

        match self {
            CustomListKind::Provider => seeded(&[
                ("prov-1", "Chase"),
                ("prov-2", "American Express"),
                ("prov-3", "Capital One"),
                ("prov-4", "Bank of America"),
                ("prov-5", "Citi"),
                ("prov-6", "Discover"),
            ]),
            CustomListKind::Network => seeded(&[
                ("net-1", "Visa"),
                ("net-2", "Mastercard"),
                ("net-3", "American Express"),
                ("net-4", "Discover"),
            ]),
            CustomListKind::Perk => Vec::new(),
        }
    }
}

/// One custom list, kept sorted by name.
#[derive(Clone)]
pub struct CustomListClient {
    kind: CustomListKind,
    items: Arc<SyncedCollection<CustomListItem>>,
}

impl CustomListClient {
    pub(crate) fn new(client: &Client, kind: CustomListKind) -> Self {
        let internal = &client.internal;
        let items = internal.state().collection(kind.key(), || {
            SyncedCollection::new(SyncConfig::new(
                internal.primary_store(),
                internal.local_store(),
                kind.key(),
            ))
        });
        Self { kind, items }
    }

    /// Which of the three lists this client manages.
    pub fn kind(&self) -> CustomListKind {
        self.kind
    }

    /// Loads the list; an empty result is seeded with the kind's defaults
    /// and persisted so the next session starts from the same state.
    pub async fn load(&self) -> DataSource {
        let source = self.items.load().await;
        if self.items.records().is_empty() {
            let defaults = self.kind.default_items();
            if !defaults.is_empty() {
                self.items.save(defaults).await;
            }
        }
        source
    }

    /// Coalesced re-load.
    pub async fn refresh(&self) -> Refresh {
        self.items.refresh().await
    }

    /// Snapshot of the in-memory list.
    pub fn list(&self) -> Vec<CustomListItem> {
        self.items.records()
    }

    /// Whether the initial load has completed.
    pub fn is_loaded(&self) -> bool {
        self.items.is_loaded()
    }

    /// Adds an entry. The name is trimmed; a blank name or a
    /// case-insensitive duplicate is rejected with
    /// [`StateError::ValidationRejected`] and nothing is persisted. On
    /// success the list is re-sorted by name before persisting.
    pub async fn add(&self, name: &str) -> Result<CustomListItem, StateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StateError::ValidationRejected("list entry name is blank"));
        }

        let mut items = self.items.records();
        if items
            .iter()
            .any(|item| item.name.to_lowercase() == name.to_lowercase())
        {
            return Err(StateError::ValidationRejected(
                "list entry name already exists",
            ));
        }

        let item = CustomListItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        };
        items.push(item.clone());
        items.sort_by_key(|item| item.name.to_lowercase());
        self.items.save(items).await;
        Ok(item)
    }

    /// Removes the entry with the matching id. Cards referencing the entry's
    /// name keep the stale name; there is no cascade.
    pub async fn delete(&self, id: &str) -> Durability {
        self.items.delete(id).await
    }
}

/// The three custom lists together.
#[derive(Clone)]
pub struct CustomListsClient {
    client: Client,
}

impl CustomListsClient {
    pub(crate) fn new(client: &Client) -> Self {
        Self {
            client: client.clone(),
        }
    }

    /// The provider list.
    pub fn providers(&self) -> CustomListClient {
        CustomListClient::new(&self.client, CustomListKind::Provider)
    }

    /// The network list.
    pub fn networks(&self) -> CustomListClient {
        CustomListClient::new(&self.client, CustomListKind::Network)
    }

    /// The perk list.
    pub fn perks(&self) -> CustomListClient {
        CustomListClient::new(&self.client, CustomListKind::Perk)
    }

    /// The list of the given kind.
    pub fn list(&self, kind: CustomListKind) -> CustomListClient {
        CustomListClient::new(&self.client, kind)
    }
}
