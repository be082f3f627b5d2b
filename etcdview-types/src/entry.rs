//! Entry and connection-status contracts.
//!
//! Field values for `version`, `create_revision` and `mod_revision` are
//! always assigned by the store; the console never computes them locally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One key-value pair as reported by the store.
///
/// Serialized with camelCase revision fields to match the console's wire
/// shape: `{ key, value, version, createRevision, modRevision }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Non-empty, externally namespaced path. Immutable once the entry
    /// exists; edits replace the value, never the key.
    pub key: String,
    /// Opaque string payload. May encode JSON or plain text; empty is valid.
    pub value: String,
    /// Per-key write counter, `1` on first creation, +1 per put.
    pub version: i64,
    /// Global store revision at which this key was first created.
    pub create_revision: i64,
    /// Global store revision of the last successful mutation.
    pub mod_revision: i64,
}

impl Entry {
    /// Creates an entry with the given key/value and zeroed revision fields.
    ///
    /// Used only as a placeholder before the store has confirmed a write;
    /// a zero `version` marks the metadata as not yet authoritative.
    pub fn unconfirmed(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            version: 0,
            create_revision: 0,
            mod_revision: 0,
        }
    }

    /// True when the revision metadata satisfies the store's invariants
    /// for a live key: `version >= 1` and `createRevision <= modRevision`.
    pub fn revisions_consistent(&self) -> bool {
        self.version >= 1 && self.create_revision <= self.mod_revision
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (v{})", self.key, self.version)
    }
}

/// What the console reports about its store connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub endpoint: String,
}
