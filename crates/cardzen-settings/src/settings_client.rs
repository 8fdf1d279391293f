use cardzen_core::Client;

use crate::{AlertsClient, ProfileClient, SafeSpendClient};

/// Entry point for the scalar preference operations.
#[derive(Clone)]
pub struct SettingsClient {
    client: Client,
}

impl SettingsClient {
    /// The safe-spend percentage.
    pub fn safe_spend(&self) -> SafeSpendClient {
        SafeSpendClient::new(&self.client)
    }

    /// The payment alert lead time.
    pub fn alerts(&self) -> AlertsClient {
        AlertsClient::new(&self.client)
    }

    /// The local user profile.
    pub fn profile(&self) -> ProfileClient {
        ProfileClient::new(&self.client)
    }
}

/// Attaches the settings operations to [`Client`].
pub trait SettingsClientExt {
    #[allow(missing_docs)]
    fn settings(&self) -> SettingsClient;
}

impl SettingsClientExt for Client {
    fn settings(&self) -> SettingsClient {
        SettingsClient {
            client: self.clone(),
        }
    }
}
