//! Synchronization layer and edit-session model for the etcdview console.
//!
//! The console keeps a client-side cache of the last-fetched entry set and
//! never patches it incrementally: after every successful mutation the cache
//! is marked stale and fully re-listed with the active prefix. The store's
//! revision numbers must be re-read anyway, and administrative key spaces
//! are small enough that a full re-list is cheaper than the correctness risk
//! of manual cache surgery.
//!
//! - [`EntryCache`]: the cached entry set, staleness, refresh generations
//!   (last refresh started wins) and in-memory substring filtering
//! - [`EditSession`]: Closed / Creating / Editing state machine for the
//!   drawer, with draft key/value handling and JSON normalization
//! - [`SyncController`]: drives a [`StoreGateway`] through the
//!   mutate-then-refresh protocol
//! - [`ApiClient`]: a `StoreGateway` over the console's own HTTP surface,
//!   for front-ends that talk to the proxy instead of the store

mod api;
mod cache;
mod controller;
mod session;

pub use api::ApiClient;
pub use cache::{EntryCache, RefreshGen, filter_entries};
pub use controller::SyncController;
pub use session::EditSession;

pub use etcdview_gateway::StoreGateway;
