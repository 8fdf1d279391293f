use cardzen_state::SyncedItem;
use serde::{Deserialize, Serialize};

/// How a benefit pays out.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BenefitType {
    /// A percentage back on qualifying spend.
    Cashback,
    /// A points multiplier on qualifying spend.
    Points,
}

/// A single benefit attached to a card. Benefit ids are unique within
/// their card.
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Benefit {
    pub id: String,
    pub name: String,
    /// Cashback percentage or points multiplier. Non-negative.
    pub value: f64,
    #[serde(rename = "type")]
    pub benefit_type: BenefitType,
}

/// A credit card as stored and synchronized.
///
/// `provider`, `network` and `perks` refer to custom list entries by name.
/// The reference is informal: renaming or deleting a list item does not
/// cascade to cards.
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    /// Unique within the collection.
    pub id: String,
    pub provider: String,
    pub network: String,
    pub card_name: String,
    pub benefits: Vec<Benefit>,
    /// Day of month, 1-31. Legacy records stored a full date-time string;
    /// see [`crate::migrate_card`].
    pub due_date: u8,
    /// Day of month, 1-31.
    pub statement_date: u8,
    /// Credit limit, non-negative.
    pub limit: f64,
    /// ISO-ish currency code, e.g. `USD`.
    pub currency: String,
    #[serde(default)]
    pub annual_fee: f64,
    #[serde(default)]
    pub apr: f64,
    /// Free-text perks on top of the structured benefits.
    #[serde(default)]
    pub perks: Vec<String>,
    /// Generated card art, as a data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Whether due-date alerts are raised for this card.
    pub enable_alerts: bool,
}

impl SyncedItem for CreditCard {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn migrate(raw: serde_json::Value) -> serde_json::Value {
        crate::migrate_card(raw)
    }
}
