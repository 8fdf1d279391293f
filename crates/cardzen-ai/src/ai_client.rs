use cardzen_core::Client;

use crate::{CardImage, CardImageRequest, Recommendation, RecommendationRequest, RecommendError};

/// Entry point for the AI operations. Both calls post JSON to the backend
/// over the client's shared HTTP stack; there is no local model.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
}

impl AiClient {
    /// Asks which card to use for a purchase.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, RecommendError> {
        let internal = &self.client.internal;
        let answer: Recommendation = internal
            .http_client()
            .post(internal.api_endpoint("recommend"))
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        answer.into_result()
    }

    /// Generates artwork for a card.
    pub async fn generate_card_image(
        &self,
        request: &CardImageRequest,
    ) -> Result<CardImage, RecommendError> {
        let internal = &self.client.internal;
        let image = internal
            .http_client()
            .post(internal.api_endpoint("card-image"))
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(image)
    }
}

/// Attaches the AI operations to [`Client`].
pub trait AiClientExt {
    #[allow(missing_docs)]
    fn ai(&self) -> AiClient;
}

impl AiClientExt for Client {
    fn ai(&self) -> AiClient {
        AiClient {
            client: self.clone(),
        }
    }
}
