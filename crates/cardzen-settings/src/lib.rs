#![doc = include_str!("../README.md")]

mod alerts;
mod profile;
mod safe_spend;
mod settings_client;

pub use alerts::{AlertSettings, AlertsClient, DEFAULT_ALERT_DAYS, MAX_ALERT_DAYS};
pub use profile::{ProfileClient, Theme, UserProfile};
pub use safe_spend::{SafeSpendClient, DEFAULT_SAFE_SPEND_PERCENTAGE};
pub use settings_client::{SettingsClient, SettingsClientExt};
