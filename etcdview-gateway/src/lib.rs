//! Store gateway — the sole owner of the connection to the key-value store.
//!
//! The gateway exposes four operations (list, get, put, delete) behind the
//! [`StoreGateway`] trait. Two implementations exist:
//! - [`EtcdGateway`]: the real thing, a lazily-constructed process-lifetime
//!   etcd client built from [`GatewayConfig`]
//! - [`MemoryGateway`]: an in-memory store with the same revision semantics,
//!   used by tests and for running the console without a cluster
//!
//! The store is the source of truth for version/revision metadata: `put`
//! always follows up with a read so callers receive store-assigned numbers,
//! never locally computed ones.

pub mod config;
mod error;
mod etcd;
mod memory;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use etcd::EtcdGateway;
pub use memory::MemoryGateway;

use async_trait::async_trait;
use etcdview_types::Entry;
use std::sync::Arc;

/// The four operations the console needs from the store.
///
/// All operations are async and suspend the caller until the store responds;
/// no retry state is held here. Reconnection is the transport's concern.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    /// Lists all entries whose key starts with `prefix`. An empty prefix is
    /// treated as the root prefix `"/"`. Order is whatever the store yields.
    /// A prefix with no matches is an empty list, not an error.
    async fn list(&self, prefix: &str) -> GatewayResult<Vec<Entry>>;

    /// Fetches exactly one key. Absent is `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> GatewayResult<Option<Entry>>;

    /// Creates or overwrites `key` and returns the authoritative entry as
    /// re-read from the store. An empty (or whitespace) key is rejected with
    /// [`GatewayError::KeyRequired`] before the store is touched; an empty
    /// value is permitted. When the write acknowledged but the confirmation
    /// read failed, the error is [`GatewayError::PartialWrite`] so callers
    /// know the mutation may have applied.
    async fn put(&self, key: &str, value: &str) -> GatewayResult<Entry>;

    /// Removes `key`. Deleting an absent key is success (idempotent). An
    /// empty key is rejected with [`GatewayError::KeyRequired`].
    async fn delete(&self, key: &str) -> GatewayResult<()>;
}

#[async_trait]
impl<G: StoreGateway + ?Sized> StoreGateway for Arc<G> {
    async fn list(&self, prefix: &str) -> GatewayResult<Vec<Entry>> {
        (**self).list(prefix).await
    }

    async fn get(&self, key: &str) -> GatewayResult<Option<Entry>> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: &str) -> GatewayResult<Entry> {
        (**self).put(key, value).await
    }

    async fn delete(&self, key: &str) -> GatewayResult<()> {
        (**self).delete(key).await
    }
}

/// Root prefix used when a caller passes an empty prefix.
pub const ROOT_PREFIX: &str = "/";

pub(crate) fn effective_prefix(prefix: &str) -> &str {
    let trimmed = prefix.trim();
    if trimmed.is_empty() { ROOT_PREFIX } else { trimmed }
}

pub(crate) fn require_key(key: &str) -> GatewayResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        Err(GatewayError::KeyRequired)
    } else {
        Ok(trimmed)
    }
}
