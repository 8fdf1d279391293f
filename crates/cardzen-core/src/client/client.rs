use std::{sync::Arc, time::Duration};

use cardzen_state::{FileStore, HttpStore, MemoryStore, StateRegistry, Store};

use super::client_settings::ClientSettings;

/// The main struct to interact with the CardZen SDK.
///
/// Cloning is cheap and returns an owned reference to the same instance, so
/// sub-clients can hold a `Client` of their own. All mutable state lives
/// behind the inner `Arc`.
#[derive(Debug, Clone)]
pub struct Client {
    #[doc(hidden)]
    pub internal: Arc<InternalClient>,
}

impl Client {
    /// Create a new CardZen client.
    pub fn new(settings: Option<ClientSettings>) -> Self {
        let settings = settings.unwrap_or_default();

        let http_client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()
            .expect("HTTP client build should not fail");

        let primary: Arc<dyn Store> = Arc::new(HttpStore::new(
            http_client.clone(),
            settings.api_url.clone(),
        ));
        let local: Arc<dyn Store> = Arc::new(FileStore::new(settings.data_dir.clone()));
        let session: Arc<dyn Store> = Arc::new(MemoryStore::new());

        Self {
            internal: Arc::new(InternalClient {
                settings,
                http_client,
                primary,
                local,
                session,
                state: StateRegistry::new(),
            }),
        }
    }
}

/// The internals of [`Client`]. Domain crates reach these through
/// `client.internal`; applications should not need to.
pub struct InternalClient {
    settings: ClientSettings,
    http_client: reqwest::Client,
    primary: Arc<dyn Store>,
    local: Arc<dyn Store>,
    session: Arc<dyn Store>,
    state: StateRegistry,
}

impl std::fmt::Debug for InternalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalClient")
            .field("settings", &self.settings)
            .finish()
    }
}

impl InternalClient {
    /// The network-backed primary store.
    pub fn primary_store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.primary)
    }

    /// The always-available local store, the durability backstop.
    pub fn local_store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.local)
    }

    /// The session-scoped store, dropped with the client.
    pub fn session_store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.session)
    }

    /// The registry caching synchronized state per storage key.
    pub fn state(&self) -> &StateRegistry {
        &self.state
    }

    /// The shared HTTP client, for boundaries outside the storage contract.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// An absolute url on the primary backend.
    pub fn api_endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.settings.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
