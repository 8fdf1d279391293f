use thiserror::Error;

/// Failures of the AI boundary, either rejected locally before a request
/// is made or reported by the backend.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The purchase description was empty.
    #[error("describe the purchase first")]
    MissingPurchaseDescription,
    /// The user has no cards to recommend from.
    #[error("no credit cards found, add a card first")]
    NoCards,
    /// The user has no spending habits to ground the recommendation.
    #[error("no spending habits found, add them in settings first")]
    NoSpendingHabits,
    /// The service answered but declined to recommend.
    #[error("recommendation declined: {0}")]
    Service(String),
    /// The request never produced a usable answer.
    #[error("AI request failed: {0}")]
    Api(#[from] reqwest::Error),
    /// State could not be snapshotted into the request payload.
    #[error("request payload could not be built: {0}")]
    Payload(#[from] serde_json::Error),
}
