use std::sync::Arc;

use cardzen_core::{keys, Client};
use cardzen_state::{DataSource, Durability, Refresh, SyncConfig, SyncedValue};
use serde::{Deserialize, Serialize};

/// Percentage of a card's limit considered safe to spend.
pub const DEFAULT_SAFE_SPEND_PERCENTAGE: i64 = 30;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct SafeSpendSetting {
    percentage: i64,
}

impl Default for SafeSpendSetting {
    fn default() -> Self {
        Self {
            percentage: DEFAULT_SAFE_SPEND_PERCENTAGE,
        }
    }
}

/// Early versions stored the percentage as a bare number rather than an
/// object; lift those into the current shape before deserializing.
fn migrate_safe_spend(raw: serde_json::Value) -> serde_json::Value {
    if raw.is_number() {
        serde_json::json!({ "percentage": raw })
    } else {
        raw
    }
}

/// The safe-spend percentage, clamped to [0, 100] on both read and write.
#[derive(Clone)]
pub struct SafeSpendClient {
    setting: Arc<SyncedValue<SafeSpendSetting>>,
}

impl SafeSpendClient {
    pub(crate) fn new(client: &Client) -> Self {
        let internal = &client.internal;
        let setting = internal.state().value(keys::SAFE_SPEND, || {
            SyncedValue::new(
                SyncConfig::new(
                    internal.primary_store(),
                    internal.local_store(),
                    keys::SAFE_SPEND,
                ),
                SafeSpendSetting::default(),
            )
            .with_migration(migrate_safe_spend)
        });
        Self { setting }
    }

    /// Loads the percentage from the store chain.
    pub async fn load(&self) -> DataSource {
        self.setting.load().await
    }

    /// Coalesced re-load.
    pub async fn refresh(&self) -> Refresh {
        self.setting.refresh().await
    }

    /// Whether the initial load has completed.
    pub fn is_loaded(&self) -> bool {
        self.setting.is_loaded()
    }

    /// The current percentage. A stored value outside [0, 100] reads as the
    /// clamped value rather than propagating bad data.
    pub fn percentage(&self) -> i64 {
        self.setting.get().percentage.clamp(0, 100)
    }

    /// Persists a new percentage, clamped to [0, 100].
    pub async fn set_percentage(&self, percentage: i64) -> Durability {
        self.setting
            .set(SafeSpendSetting {
                percentage: percentage.clamp(0, 100),
            })
            .await
    }
}
