//! Namespaced storage keys.
//!
//! These match the keys the web dashboard has always written to browser
//! storage, so an SDK client picks up existing local data in place. On the
//! primary backend the key doubles as the REST resource path.

/// The credit card collection.
pub const CREDIT_CARDS: &str = "cardzen-credit-cards";

/// The custom provider list.
pub const PROVIDERS: &str = "cardzen-providers";

/// The custom network list.
pub const NETWORKS: &str = "cardzen-networks";

/// The custom perk list.
pub const PERKS: &str = "cardzen-perks";

/// The spending habit collection.
pub const SPENDING_HABITS: &str = "cardzen-spending-habits";

/// The safe-spend percentage setting.
pub const SAFE_SPEND: &str = "cardzen-safe-spend-percentage";

/// The due-date alert settings.
pub const ALERT_SETTINGS: &str = "cardzen-alert-settings";

/// Device-local security settings (enablement and the password). Only ever
/// written to the local store.
pub const SECURITY_SETTINGS: &str = "cardzen-security-settings";

/// Security flags that sync through the primary backend (biometric, PIN).
/// Kept under their own key so the synced copy cannot clobber the
/// device-local settings.
pub const SECURITY_FLAGS: &str = "cardzen-security-flags";

/// The user profile. Local-only.
pub const USER_PROFILE: &str = "cardzen-user-profile";

/// The session-scoped authentication flag.
pub const AUTH_SESSION: &str = "cardzen-authenticated";
