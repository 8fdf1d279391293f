use std::time::Duration;

use crate::{StateError, Store};

/// Default timeout for requests against the primary backend.
///
/// An unresponsive backend has to fail within a bounded window so the local
/// fallback store gets a chance to serve the session; without a timeout a
/// hung request would stall the fallback chain indefinitely.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The network-backed primary store.
///
/// Keys map directly to REST resources: `GET {base}/{key}` returns the
/// current value, `POST {base}/{key}` replaces it. A 404 reads as absent;
/// any other non-success status or transport failure is reported as
/// [`StateError::TransientIo`].
#[derive(Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    /// Creates a store against `base_url` using the provided client.
    ///
    /// The client is expected to carry a request timeout, see
    /// [`DEFAULT_REQUEST_TIMEOUT`].
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    fn url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[async_trait::async_trait]
impl Store for HttpStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StateError> {
        let response = self.client.get(self.url(key)).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(Some(response.text().await?))
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Ok(None)
        } else {
            Err(StateError::TransientIo(format!(
                "GET {key} returned {status}"
            )))
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StateError> {
        let response = self
            .client
            .post(self.url(key))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(value.to_string())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(StateError::TransientIo(format!(
                "POST {key} returned {status}"
            )))
        }
    }
}
