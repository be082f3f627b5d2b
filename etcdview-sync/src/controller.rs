//! Drives a gateway through the mutate-then-refresh protocol.
//!
//! Every successful put or delete marks the cache stale and triggers a full
//! re-list with the active prefix. The mutation's outcome is reported to
//! the caller even when the follow-up refresh fails; the cache simply stays
//! stale and the failure is logged, never swallowed silently.

use crate::cache::EntryCache;
use crate::session::EditSession;
use etcdview_gateway::{GatewayResult, StoreGateway};
use etcdview_types::Entry;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Synchronization-layer front door: one gateway, one cache.
pub struct SyncController<G> {
    gateway: G,
    cache: RwLock<EntryCache>,
}

impl<G: StoreGateway> SyncController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            cache: RwLock::new(EntryCache::new()),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ── Reads ───────────────────────────────────────────────────

    /// Snapshot of the cached entries.
    pub async fn entries(&self) -> Vec<Entry> {
        self.cache.read().await.entries().to_vec()
    }

    /// Snapshot of the cached entries, filtered by key substring.
    pub async fn filtered(&self, query: &str) -> Vec<Entry> {
        let cache = self.cache.read().await;
        cache.filter(query).into_iter().cloned().collect()
    }

    pub async fn is_stale(&self) -> bool {
        self.cache.read().await.is_stale()
    }

    pub async fn is_refreshing(&self) -> bool {
        self.cache.read().await.is_refreshing()
    }

    pub async fn active_prefix(&self) -> String {
        self.cache.read().await.prefix().to_string()
    }

    // ── Refresh ─────────────────────────────────────────────────

    /// Fully re-lists the active prefix. Only the most recently started
    /// refresh installs its results; a superseded one resolves without
    /// touching the cache.
    pub async fn refresh(&self) -> GatewayResult<Vec<Entry>> {
        let (generation, prefix) = {
            let mut cache = self.cache.write().await;
            (cache.begin_refresh(), cache.prefix().to_string())
        };

        match self.gateway.list(&prefix).await {
            Ok(entries) => {
                let mut cache = self.cache.write().await;
                let installed = cache.complete_refresh(generation, entries.clone());
                debug!(prefix, count = entries.len(), installed, "refresh resolved");
                Ok(entries)
            }
            Err(err) => {
                self.cache.write().await.fail_refresh(generation);
                Err(err)
            }
        }
    }

    /// Changes the active prefix and re-lists under it.
    pub async fn set_prefix(&self, prefix: impl Into<String>) -> GatewayResult<Vec<Entry>> {
        self.cache.write().await.set_prefix(prefix);
        self.refresh().await
    }

    // ── Mutations ───────────────────────────────────────────────

    /// Puts `key = value` and refreshes. Returns the store-confirmed entry;
    /// a failed follow-up refresh leaves the cache stale but does not turn
    /// the successful save into an error.
    pub async fn save(&self, key: &str, value: &str) -> GatewayResult<Entry> {
        let entry = self.gateway.put(key, value).await?;
        self.refresh_after_mutation("save").await;
        Ok(entry)
    }

    /// Deletes `key` and refreshes. Deleting an absent key succeeds.
    pub async fn remove(&self, key: &str) -> GatewayResult<()> {
        self.gateway.delete(key).await?;
        self.refresh_after_mutation("delete").await;
        Ok(())
    }

    /// Saves whatever the session has drafted. `Ok(None)` when the save is
    /// a validation no-op (closed drawer or empty draft key). On success
    /// the session first shows the store-confirmed entry, then closes once
    /// the refresh cycle is done.
    pub async fn save_session(&self, session: &mut EditSession) -> GatewayResult<Option<Entry>> {
        let Some((key, value)) = session.save_request() else {
            return Ok(None);
        };

        let entry = self.save(&key, &value).await?;
        session.confirm_saved(entry.clone());
        session.close();
        Ok(Some(entry))
    }

    async fn refresh_after_mutation(&self, op: &str) {
        self.cache.write().await.mark_stale();
        if let Err(err) = self.refresh().await {
            warn!(op, %err, "refresh after mutation failed; cache stays stale");
        }
    }
}
