use std::sync::Arc;

use cardzen_core::{keys, Client};
use cardzen_state::{
    DataSource, Durability, Refresh, SyncConfig, SyncedCollection, SyncedItem,
};
use serde::{Deserialize, Serialize};

/// A monthly spending category used to ground AI recommendations.
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendingHabit {
    pub id: String,
    pub category: String,
    pub amount: f64,
}

impl SyncedItem for SpendingHabit {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Manages the user's spending habits.
#[derive(Clone)]
pub struct SpendingHabitsClient {
    habits: Arc<SyncedCollection<SpendingHabit>>,
}

impl SpendingHabitsClient {
    pub(crate) fn new(client: &Client) -> Self {
        let internal = &client.internal;
        let habits = internal.state().collection(keys::SPENDING_HABITS, || {
            SyncedCollection::new(SyncConfig::new(
                internal.primary_store(),
                internal.local_store(),
                keys::SPENDING_HABITS,
            ))
        });
        Self { habits }
    }

    /// Loads the habits from the store chain.
    pub async fn load(&self) -> DataSource {
        self.habits.load().await
    }

    /// Coalesced re-load.
    pub async fn refresh(&self) -> Refresh {
        self.habits.refresh().await
    }

    /// Snapshot of the in-memory habits.
    pub fn list(&self) -> Vec<SpendingHabit> {
        self.habits.records()
    }

    /// Whether the initial load has completed.
    pub fn is_loaded(&self) -> bool {
        self.habits.is_loaded()
    }

    /// Adds a habit. A negative amount is floored to zero.
    pub async fn add(&self, category: &str, amount: f64) -> SpendingHabit {
        let habit = SpendingHabit {
            id: String::new(),
            category: category.to_string(),
            amount: amount.max(0.0),
        };
        self.habits.add(habit).await
    }

    /// Replaces the habit with the matching id.
    pub async fn update(&self, mut habit: SpendingHabit) -> Durability {
        habit.amount = habit.amount.max(0.0);
        self.habits.update(habit).await
    }

    /// Removes the habit with the matching id.
    pub async fn delete(&self, id: &str) -> Durability {
        self.habits.delete(id).await
    }

    /// Replaces the whole list at once.
    pub async fn save_all(&self, habits: Vec<SpendingHabit>) -> Durability {
        let habits = habits
            .into_iter()
            .map(|mut habit| {
                habit.amount = habit.amount.max(0.0);
                habit
            })
            .collect();
        self.habits.save(habits).await
    }
}
