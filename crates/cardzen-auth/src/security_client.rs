use std::sync::Arc;

use cardzen_core::{keys, Client};
use cardzen_state::{
    DataSource, Durability, Refresh, StateError, SyncConfig, SyncedValue,
};

use crate::security_settings::{LocalSecurity, RemoteSecurityFlags};

/// The app-lock gate.
///
/// Three pieces of state with three different lifetimes: the password and
/// enabled flag live on the local store only, the biometric and pin flags
/// go through the regular store chain, and the authenticated flag lives in
/// the session store and disappears with the client.
#[derive(Clone)]
pub struct SecurityClient {
    local: Arc<SyncedValue<LocalSecurity>>,
    flags: Arc<SyncedValue<RemoteSecurityFlags>>,
    session: Arc<SyncedValue<bool>>,
}

impl SecurityClient {
    pub(crate) fn new(client: &Client) -> Self {
        let internal = &client.internal;
        let local = internal.state().value(keys::SECURITY_SETTINGS, || {
            SyncedValue::new(
                SyncConfig::local_only(internal.local_store(), keys::SECURITY_SETTINGS),
                LocalSecurity::default(),
            )
        });
        let flags = internal.state().value(keys::SECURITY_FLAGS, || {
            SyncedValue::new(
                SyncConfig::new(
                    internal.primary_store(),
                    internal.local_store(),
                    keys::SECURITY_FLAGS,
                ),
                RemoteSecurityFlags::default(),
            )
        });
        let session = internal.state().value(keys::AUTH_SESSION, || {
            SyncedValue::new(
                SyncConfig::local_only(internal.session_store(), keys::AUTH_SESSION),
                false,
            )
        });
        Self {
            local,
            flags,
            session,
        }
    }

    /// Loads all three pieces of security state. The returned source is the
    /// one the synchronized flags came from.
    pub async fn load(&self) -> DataSource {
        self.local.load().await;
        self.session.load().await;
        self.flags.load().await
    }

    /// Coalesced re-load of the synchronized flags.
    pub async fn refresh(&self) -> Refresh {
        self.flags.refresh().await
    }

    /// Whether the initial load has completed.
    pub fn is_loaded(&self) -> bool {
        self.local.is_loaded() && self.flags.is_loaded() && self.session.is_loaded()
    }

    /// Whether the app lock is turned on.
    pub fn is_security_enabled(&self) -> bool {
        self.local.get().is_enabled
    }

    /// Whether a password has been set.
    pub fn has_password(&self) -> bool {
        self.local.get().has_password()
    }

    /// Whether this session has passed the lock screen.
    pub fn is_authenticated(&self) -> bool {
        self.session.get()
    }

    /// Whether the vault is reachable right now, either because the lock is
    /// off or because this session already authenticated.
    pub fn is_unlocked(&self) -> bool {
        !self.is_security_enabled() || self.is_authenticated()
    }

    /// The synchronized unlock-method preferences.
    pub fn security_flags(&self) -> RemoteSecurityFlags {
        self.flags.get()
    }

    /// Sets the app-lock password. A blank password is rejected. Setting the
    /// first password turns the lock on; the session stays behind the lock
    /// screen until the next [`SecurityClient::login`].
    pub async fn set_password(&self, password: &str) -> Result<(), StateError> {
        if password.trim().is_empty() {
            return Err(StateError::ValidationRejected("password is blank"));
        }

        let mut local = self.local.get();
        let first_password = !local.has_password();
        local.password = Some(password.to_string());
        if first_password {
            local.is_enabled = true;
        }
        self.local.set(local).await;
        Ok(())
    }

    /// Removes the password and turns the lock off. The session stays
    /// authenticated; there is nothing left to authenticate against.
    pub async fn remove_password(&self) {
        self.local.set(LocalSecurity::default()).await;
        self.session.set(true).await;
    }

    /// Turns the app lock on or off. Only effective with a password set
    /// already, in either direction. Disabling authenticates the session.
    pub async fn set_security_enabled(&self, enabled: bool) -> Result<(), StateError> {
        let mut local = self.local.get();
        if !local.has_password() {
            return Err(StateError::ValidationRejected(
                "cannot toggle the lock without a password",
            ));
        }
        local.is_enabled = enabled;
        self.local.set(local).await;
        if !enabled {
            self.session.set(true).await;
        }
        Ok(())
    }

    /// Attempts to pass the lock screen. Succeeds when the lock is off or
    /// the password matches; a failed attempt leaves the session untouched.
    pub async fn login(&self, password: &str) -> bool {
        let local = self.local.get();
        let accepted =
            !local.is_enabled || local.password.as_deref() == Some(password);
        if accepted {
            self.session.set(true).await;
        }
        accepted
    }

    /// Drops the session back behind the lock screen.
    pub async fn logout(&self) {
        self.session.set(false).await;
    }

    /// Persists the biometric unlock preference.
    pub async fn set_biometric_enabled(&self, enabled: bool) -> Durability {
        let mut flags = self.flags.get();
        flags.biometric_enabled = enabled;
        self.flags.set(flags).await
    }

    /// Persists the pin unlock preference.
    pub async fn set_pin_enabled(&self, enabled: bool) -> Durability {
        let mut flags = self.flags.get();
        flags.pin_enabled = enabled;
        self.flags.set(flags).await
    }
}

/// Attaches the security operations to [`Client`].
pub trait SecurityClientExt {
    #[allow(missing_docs)]
    fn security(&self) -> SecurityClient;
}

impl SecurityClientExt for Client {
    fn security(&self) -> SecurityClient {
        SecurityClient::new(self)
    }
}
