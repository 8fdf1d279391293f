use std::sync::Arc;

use cardzen_core::{keys, Client};
use cardzen_state::{DataSource, Durability, Refresh, SyncConfig, SyncedValue};
use serde::{Deserialize, Serialize};

/// Days before a due date that a payment alert fires.
pub const DEFAULT_ALERT_DAYS: i64 = 7;

/// Upper bound on the alert lead time.
pub const MAX_ALERT_DAYS: i64 = 30;

/// Payment alert preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertSettings {
    /// Days before a due date that an alert fires.
    pub alert_days: i64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            alert_days: DEFAULT_ALERT_DAYS,
        }
    }
}

/// The alert lead time, clamped to [0, 30] on write.
#[derive(Clone)]
pub struct AlertsClient {
    settings: Arc<SyncedValue<AlertSettings>>,
}

impl AlertsClient {
    pub(crate) fn new(client: &Client) -> Self {
        let internal = &client.internal;
        let settings = internal.state().value(keys::ALERT_SETTINGS, || {
            SyncedValue::new(
                SyncConfig::new(
                    internal.primary_store(),
                    internal.local_store(),
                    keys::ALERT_SETTINGS,
                ),
                AlertSettings::default(),
            )
        });
        Self { settings }
    }

    /// Loads the settings from the store chain.
    pub async fn load(&self) -> DataSource {
        self.settings.load().await
    }

    /// Coalesced re-load.
    pub async fn refresh(&self) -> Refresh {
        self.settings.refresh().await
    }

    /// Whether the initial load has completed.
    pub fn is_loaded(&self) -> bool {
        self.settings.is_loaded()
    }

    /// The current alert lead time in days.
    pub fn alert_days(&self) -> i64 {
        self.settings.get().alert_days.clamp(0, MAX_ALERT_DAYS)
    }

    /// Persists a new lead time, clamped to [0, 30].
    pub async fn set_alert_days(&self, days: i64) -> Durability {
        self.settings
            .set(AlertSettings {
                alert_days: days.clamp(0, MAX_ALERT_DAYS),
            })
            .await
    }
}
