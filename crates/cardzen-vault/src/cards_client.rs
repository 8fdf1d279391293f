use std::sync::Arc;

use cardzen_core::{keys, Client};
use cardzen_state::{DataSource, Durability, Refresh, SyncConfig, SyncedCollection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Benefit, BenefitType, CreditCard};

/// Request to add a credit card. The card id and the benefit ids are
/// assigned by the SDK.
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CardAddRequest {
    pub provider: String,
    pub network: String,
    pub card_name: String,
    #[serde(default)]
    pub benefits: Vec<BenefitRequest>,
    /// Day of month, clamped into 1-31.
    pub due_date: u8,
    /// Day of month, clamped into 1-31.
    pub statement_date: u8,
    pub limit: f64,
    pub currency: String,
    #[serde(default)]
    pub annual_fee: f64,
    #[serde(default)]
    pub apr: f64,
    #[serde(default)]
    pub perks: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_enable_alerts")]
    pub enable_alerts: bool,
}

/// A benefit within a [`CardAddRequest`].
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BenefitRequest {
    pub name: String,
    /// Clamped non-negative.
    pub value: f64,
    #[serde(rename = "type")]
    pub benefit_type: BenefitType,
}

fn default_enable_alerts() -> bool {
    true
}

/// Credit card operations.
#[derive(Clone)]
pub struct CardsClient {
    cards: Arc<SyncedCollection<CreditCard>>,
}

impl CardsClient {
    pub(crate) fn new(client: &Client) -> Self {
        let internal = &client.internal;
        let cards = internal.state().collection(keys::CREDIT_CARDS, || {
            SyncedCollection::new(SyncConfig::new(
                internal.primary_store(),
                internal.local_store(),
                keys::CREDIT_CARDS,
            ))
        });
        Self { cards }
    }

    /// Loads the cards through the primary/fallback chain, migrating legacy
    /// records on the way in.
    pub async fn load(&self) -> DataSource {
        self.cards.load().await
    }

    /// Coalesced re-load; safe to call on every navigation.
    pub async fn refresh(&self) -> Refresh {
        self.cards.refresh().await
    }

    /// Snapshot of the in-memory collection.
    pub fn list(&self) -> Vec<CreditCard> {
        self.cards.records()
    }

    /// Whether the initial load has completed.
    pub fn is_loaded(&self) -> bool {
        self.cards.is_loaded()
    }

    /// Adds a card and returns it with its freshly assigned id.
    ///
    /// The record is visible in [`CardsClient::list`] immediately;
    /// durability is best-effort and not guaranteed at return time.
    pub async fn add(&self, request: CardAddRequest) -> CreditCard {
        let card = CreditCard {
            id: String::new(),
            provider: request.provider,
            network: request.network,
            card_name: request.card_name,
            benefits: request
                .benefits
                .into_iter()
                .map(|benefit| Benefit {
                    id: Uuid::new_v4().to_string(),
                    name: benefit.name,
                    value: benefit.value.max(0.0),
                    benefit_type: benefit.benefit_type,
                })
                .collect(),
            due_date: request.due_date.clamp(1, 31),
            statement_date: request.statement_date.clamp(1, 31),
            limit: request.limit.max(0.0),
            currency: request.currency,
            annual_fee: request.annual_fee.max(0.0),
            apr: request.apr.max(0.0),
            perks: request.perks,
            image_url: request.image_url,
            enable_alerts: request.enable_alerts,
        };
        self.cards.add(card).await
    }

    /// Replaces the card with the matching id; silently does nothing to the
    /// collection if the id is unknown.
    pub async fn update(&self, card: CreditCard) -> Durability {
        self.cards.update(card).await
    }

    /// Removes the card with the matching id, if any.
    pub async fn delete(&self, id: &str) -> Durability {
        self.cards.delete(id).await
    }
}
