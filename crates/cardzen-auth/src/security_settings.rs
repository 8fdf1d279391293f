use serde::{Deserialize, Serialize};

/// App-lock state that never leaves the device. The password is stored
/// locally only, on purpose; the synchronized backend never sees it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalSecurity {
    /// Whether the app lock is turned on.
    pub is_enabled: bool,
    /// The app-lock password, present once one has been set.
    pub password: Option<String>,
}

impl LocalSecurity {
    /// Whether a password has been set.
    pub fn has_password(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Unlock-method preferences that synchronize like any other setting.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteSecurityFlags {
    /// Whether biometric unlock is enabled.
    pub biometric_enabled: bool,
    /// Whether pin unlock is enabled.
    pub pin_enabled: bool,
}
