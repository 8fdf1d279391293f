mod file;
mod http;
mod memory;

pub use file::FileStore;
pub use http::{HttpStore, DEFAULT_REQUEST_TIMEOUT};
pub use memory::MemoryStore;

use crate::StateError;

/// A key-value backing store holding JSON-serialized values.
///
/// Every write replaces the whole value under the key; there are no partial
/// updates. Implementations are shared behind an `Arc` and must tolerate
/// overlapping async calls.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Reads the value stored under `key`, `None` if absent.
    async fn read(&self, key: &str) -> Result<Option<String>, StateError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> Result<(), StateError>;
}
