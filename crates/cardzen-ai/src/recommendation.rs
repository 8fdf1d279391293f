use cardzen_vault::{CreditCard, SpendingHabit};
use serde::{Deserialize, Serialize};

use crate::RecommendError;

/// Sentinel card name the service uses to report a failure in-band.
const SERVICE_ERROR_SENTINEL: &str = "Error";

/// A validated recommendation request. The card and habit snapshots are
/// carried as JSON strings; the backend prompt embeds them verbatim.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// What the user is about to buy.
    pub purchase_description: String,
    /// JSON snapshot of the user's cards.
    pub card_details: String,
    /// JSON snapshot of the user's spending habits.
    pub spending_habits: String,
}

impl RecommendationRequest {
    /// Builds a request, rejecting inputs the service cannot answer on: a
    /// blank description, no cards or no habits.
    pub fn new(
        purchase_description: &str,
        cards: &[CreditCard],
        habits: &[SpendingHabit],
    ) -> Result<Self, RecommendError> {
        let purchase_description = purchase_description.trim();
        if purchase_description.is_empty() {
            return Err(RecommendError::MissingPurchaseDescription);
        }
        if cards.is_empty() {
            return Err(RecommendError::NoCards);
        }
        if habits.is_empty() {
            return Err(RecommendError::NoSpendingHabits);
        }

        Ok(Self {
            purchase_description: purchase_description.to_string(),
            card_details: serde_json::to_string(cards)?,
            spending_habits: serde_json::to_string(habits)?,
        })
    }
}

/// A recommendation from the service.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// The name of the recommended card.
    pub recommended_card: String,
    /// Why that card is the best choice for the purchase.
    pub reasoning: String,
}

impl Recommendation {
    /// The service reports its own failures in-band with a sentinel card
    /// name; lift those into an error.
    pub(crate) fn into_result(self) -> Result<Self, RecommendError> {
        if self.recommended_card == SERVICE_ERROR_SENTINEL {
            Err(RecommendError::Service(self.reasoning))
        } else {
            Ok(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use cardzen_vault::{CreditCard, SpendingHabit};

    use super::*;

    fn card() -> CreditCard {
        serde_json::from_str(
            r#"{
                "id": "card-1",
                "provider": "Chase",
                "network": "Visa",
                "cardName": "Freedom",
                "benefits": [],
                "dueDate": 10,
                "statementDate": 25,
                "limit": 3000,
                "currency": "USD",
                "enableAlerts": true
            }"#,
        )
        .unwrap()
    }

    fn habit() -> SpendingHabit {
        SpendingHabit {
            id: "habit-1".to_string(),
            category: "Groceries".to_string(),
            amount: 400.0,
        }
    }

    #[test]
    fn blank_description_is_rejected() {
        let result = RecommendationRequest::new("   ", &[card()], &[habit()]);
        assert!(matches!(
            result,
            Err(RecommendError::MissingPurchaseDescription)
        ));
    }

    #[test]
    fn missing_cards_and_habits_are_rejected() {
        assert!(matches!(
            RecommendationRequest::new("new laptop", &[], &[habit()]),
            Err(RecommendError::NoCards)
        ));
        assert!(matches!(
            RecommendationRequest::new("new laptop", &[card()], &[]),
            Err(RecommendError::NoSpendingHabits)
        ));
    }

    #[test]
    fn valid_inputs_are_snapshotted_as_json() {
        let request =
            RecommendationRequest::new(" new laptop ", &[card()], &[habit()]).unwrap();
        assert_eq!(request.purchase_description, "new laptop");
        assert!(request.card_details.contains("Freedom"));
        assert!(request.spending_habits.contains("Groceries"));
    }

    #[test]
    fn sentinel_card_name_becomes_a_service_error() {
        let answer = Recommendation {
            recommended_card: "Error".to_string(),
            reasoning: "no beneficial card".to_string(),
        };
        assert!(matches!(
            answer.into_result(),
            Err(RecommendError::Service(reason)) if reason == "no beneficial card"
        ));
    }
}
