//! Gateway error taxonomy.

use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur talking to the store.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Validation failure caught before the store is touched. The message
    /// is the exact string the HTTP surface returns with status 400.
    #[error("Key is required")]
    KeyRequired,

    /// Transport-level failure: the store is unreachable or the connection
    /// could not be established.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with a protocol-level error.
    #[error("store error: {0}")]
    Protocol(String),

    /// A put's primary write acknowledged but the confirmation read failed.
    /// The mutation may have applied despite this error; callers must not
    /// treat it as a clean failure.
    #[error("write to '{key}' may have applied; refresh to confirm ({reason})")]
    PartialWrite { key: String, reason: String },

    /// Invalid gateway configuration (unreadable TLS material, no endpoints).
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GatewayError {
    /// True when the underlying mutation may have reached the store even
    /// though the call returned an error.
    pub fn may_have_applied(&self) -> bool {
        matches!(self, GatewayError::PartialWrite { .. })
    }
}

impl From<etcd_client::Error> for GatewayError {
    fn from(err: etcd_client::Error) -> Self {
        match err {
            etcd_client::Error::GRpcStatus(status) => {
                GatewayError::Protocol(status.message().to_string())
            }
            other => GatewayError::Unavailable(other.to_string()),
        }
    }
}
