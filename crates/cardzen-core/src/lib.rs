#![doc = include_str!("../README.md")]

mod client;

/// Namespaced storage keys shared by every backing store.
pub mod keys;

pub use client::{Client, ClientSettings, InternalClient};
