#![doc = include_str!("../README.md")]

mod security_client;
mod security_settings;

pub use security_client::{SecurityClient, SecurityClientExt};
pub use security_settings::{LocalSecurity, RemoteSecurityFlags};
