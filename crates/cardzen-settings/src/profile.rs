use std::sync::Arc;

use cardzen_core::{keys, Client};
use cardzen_state::{DataSource, Durability, SyncConfig, SyncedValue};
use serde::{Deserialize, Serialize};

/// Color scheme preference.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[allow(missing_docs)]
    Light,
    #[allow(missing_docs)]
    Dark,
    #[allow(missing_docs)]
    #[default]
    System,
}

/// The local user profile. Stays on the device, like the security password.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// Row id, assigned on first save.
    pub id: Option<i64>,
    /// Display name shown on the dashboard greeting.
    pub name: String,
    /// Color scheme preference.
    pub theme: Theme,
}

/// Manages the local user profile.
#[derive(Clone)]
pub struct ProfileClient {
    profile: Arc<SyncedValue<UserProfile>>,
}

impl ProfileClient {
    pub(crate) fn new(client: &Client) -> Self {
        let internal = &client.internal;
        let profile = internal.state().value(keys::USER_PROFILE, || {
            SyncedValue::new(
                SyncConfig::local_only(internal.local_store(), keys::USER_PROFILE),
                UserProfile::default(),
            )
        });
        Self { profile }
    }

    /// Loads the profile from the local store.
    pub async fn load(&self) -> DataSource {
        self.profile.load().await
    }

    /// Whether the initial load has completed.
    pub fn is_loaded(&self) -> bool {
        self.profile.is_loaded()
    }

    /// The current profile.
    pub fn profile(&self) -> UserProfile {
        self.profile.get()
    }

    /// Updates the display name, keeping the rest of the profile.
    pub async fn save_name(&self, name: &str) -> Durability {
        let mut profile = self.profile.get();
        profile.name = name.to_string();
        self.save(profile).await
    }

    /// Updates the theme, keeping the rest of the profile.
    pub async fn save_theme(&self, theme: Theme) -> Durability {
        let mut profile = self.profile.get();
        profile.theme = theme;
        self.save(profile).await
    }

    async fn save(&self, mut profile: UserProfile) -> Durability {
        // A single-user profile row; the id exists from the first save on.
        profile.id = profile.id.or(Some(1));
        self.profile.set(profile).await
    }
}
