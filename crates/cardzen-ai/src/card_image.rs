use serde::{Deserialize, Serialize};

/// Inputs for generating card artwork.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardImageRequest {
    /// The issuing bank or provider.
    pub provider: String,
    /// The card's display name.
    pub card_name: String,
    /// The card network, e.g. Visa or Mastercard.
    pub network: String,
}

/// Generated card artwork.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    /// The image as a data URI.
    pub image_url: String,
}
