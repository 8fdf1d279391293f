use thiserror::Error;

/// The closed set of failure kinds produced by the state layer.
///
/// Backend failures are never fatal to a session: collection operations fold
/// them into their outcome values ([`crate::DataSource`],
/// [`crate::Durability`]) and keep serving the in-memory state. The enum
/// exists so callers and tests can tell a degraded load apart from a
/// genuinely empty one without scraping logs.
#[derive(Debug, Error)]
pub enum StateError {
    /// A network or I/O failure that may succeed on retry.
    #[error("transient backend failure: {0}")]
    TransientIo(String),

    /// A stored value that could not be parsed into the expected shape.
    #[error("malformed stored value: {0}")]
    Malformed(String),

    /// A mutation rejected at the boundary, before any state change.
    #[error("rejected: {0}")]
    ValidationRejected(&'static str),
}

impl From<reqwest::Error> for StateError {
    fn from(e: reqwest::Error) -> Self {
        StateError::TransientIo(e.to_string())
    }
}

impl From<serde_json::Error> for StateError {
    fn from(e: serde_json::Error) -> Self {
        StateError::Malformed(e.to_string())
    }
}

impl From<std::io::Error> for StateError {
    fn from(e: std::io::Error) -> Self {
        StateError::TransientIo(e.to_string())
    }
}
