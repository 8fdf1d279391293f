use cardzen_core::Client;

use crate::{cards_client::CardsClient, CustomListsClient, SpendingHabitsClient};

/// Entry point for the card, custom list and spending habit operations.
#[derive(Clone)]
pub struct VaultClient {
    client: Client,
}

impl VaultClient {
    /// The credit cards.
    pub fn cards(&self) -> CardsClient {
        CardsClient::new(&self.client)
    }

    /// The provider, network and perk lists.
    pub fn custom_lists(&self) -> CustomListsClient {
        CustomListsClient::new(&self.client)
    }

    /// The spending habits.
    pub fn spending_habits(&self) -> SpendingHabitsClient {
        SpendingHabitsClient::new(&self.client)
    }
}

/// Attaches the vault operations to [`Client`].
pub trait VaultClientExt {
    #[allow(missing_docs)]
    fn vault(&self) -> VaultClient;
}

impl VaultClientExt for Client {
    fn vault(&self) -> VaultClient {
        VaultClient {
            client: self.clone(),
        }
    }
}
