use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Basic client behavior settings. They specify the targets of the CardZen
/// client and are uneditable once the client is initialized.
///
/// Defaults to
///
/// ```
/// # use cardzen_core::ClientSettings;
/// let settings = ClientSettings {
///     api_url: "https://api.cardzen.app".to_string(),
///     data_dir: "data/json".into(),
///     user_agent: "CardZen Rust-SDK".to_string(),
///     request_timeout_ms: 10_000,
/// };
/// let default = ClientSettings::default();
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientSettings {
    /// The url of the primary CardZen backend. Defaults to `https://api.cardzen.app`
    pub api_url: String,
    /// Root directory of the local fallback store. Defaults to `data/json`.
    pub data_dir: PathBuf,
    /// The user_agent sent to the backend. Defaults to `CardZen Rust-SDK`
    pub user_agent: String,
    /// Timeout applied to every request against the primary backend, so an
    /// unresponsive backend fails over to the local store instead of
    /// stalling the session. Defaults to 10 seconds.
    pub request_timeout_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.cardzen.app".into(),
            data_dir: "data/json".into(),
            user_agent: "CardZen Rust-SDK".into(),
            request_timeout_ms: 10_000,
        }
    }
}
