#![doc = include_str!("../README.md")]

mod ai_client;
mod card_image;
mod error;
mod recommendation;

pub use ai_client::{AiClient, AiClientExt};
pub use card_image::{CardImage, CardImageRequest};
pub use error::RecommendError;
pub use recommendation::{Recommendation, RecommendationRequest};
