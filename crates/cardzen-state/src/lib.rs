#![doc = include_str!("../README.md")]

mod error;

/// Cached state instances shared by every sub-client of one `Client`.
pub mod registry;

/// The storage backend contract and its implementations.
pub mod store;

/// The generalized collection synchronization pattern.
pub mod synced;

/// The scalar twin of [`synced::SyncedCollection`].
pub mod value;

pub use error::StateError;
pub use registry::StateRegistry;
pub use store::{FileStore, HttpStore, MemoryStore, Store};
pub use synced::{
    DataSource, Durability, Refresh, SyncConfig, SyncedCollection, SyncedItem,
    DEFAULT_REFRESH_COOLDOWN,
};
pub use value::SyncedValue;
