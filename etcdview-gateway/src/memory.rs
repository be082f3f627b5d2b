//! In-memory gateway with store-faithful revision semantics.
//!
//! Backs tests and lets the console run without a cluster. Mirrors the
//! store's metadata rules: one global revision counter advanced by every
//! mutation, per-key version starting at 1 and incrementing per put, and a
//! fresh createRevision when a deleted key is recreated.

use crate::error::{GatewayError, GatewayResult};
use crate::{StoreGateway, effective_prefix, require_key};
use async_trait::async_trait;
use etcdview_types::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryStore {
    /// Global revision counter, advanced by every put and every effective
    /// delete.
    revision: i64,
    entries: HashMap<String, Entry>,
}

/// Gateway over a process-local map instead of a cluster.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    store: RwLock<MemoryStore>,
    unavailable: AtomicBool,
    fail_confirmation: AtomicBool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every operation fail with `Unavailable`, simulating an
    /// unreachable store.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes put's confirmation read fail after the write has applied,
    /// simulating the partial-write path.
    pub fn fail_confirmation_reads(&self, fail: bool) {
        self.fail_confirmation.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> GatewayResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(GatewayError::Unavailable(
                "store connection refused".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StoreGateway for MemoryGateway {
    async fn list(&self, prefix: &str) -> GatewayResult<Vec<Entry>> {
        self.check_available()?;
        let prefix = effective_prefix(prefix);
        let store = self.store.read().await;
        Ok(store
            .entries
            .values()
            .filter(|entry| entry.key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn get(&self, key: &str) -> GatewayResult<Option<Entry>> {
        self.check_available()?;
        let key = require_key(key)?;
        let store = self.store.read().await;
        Ok(store.entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> GatewayResult<Entry> {
        self.check_available()?;
        let key = require_key(key)?;
        let mut store = self.store.write().await;
        store.revision += 1;
        let revision = store.revision;

        let entry = match store.entries.get_mut(key) {
            Some(existing) => {
                existing.value = value.to_string();
                existing.version += 1;
                existing.mod_revision = revision;
                existing.clone()
            }
            None => {
                let entry = Entry {
                    key: key.to_string(),
                    value: value.to_string(),
                    version: 1,
                    create_revision: revision,
                    mod_revision: revision,
                };
                store.entries.insert(key.to_string(), entry.clone());
                entry
            }
        };

        // The write above has applied; a confirmation failure from here on
        // is a partial write, not a clean one.
        if self.fail_confirmation.load(Ordering::SeqCst) {
            return Err(GatewayError::PartialWrite {
                key: key.to_string(),
                reason: "confirmation read failed".to_string(),
            });
        }
        Ok(entry)
    }

    async fn delete(&self, key: &str) -> GatewayResult<()> {
        self.check_available()?;
        let key = require_key(key)?;
        let mut store = self.store.write().await;
        if store.entries.remove(key).is_some() {
            store.revision += 1;
        }
        Ok(())
    }
}
