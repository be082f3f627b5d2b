//! Client-side entry cache with refresh-generation tracking.
//!
//! The cache is never authoritative. Each refresh is issued a generation
//! number; only the completion of the most recently started refresh
//! installs results, so redundant refreshes can race freely without
//! producing an inconsistent final state.

use etcdview_types::Entry;

/// Token identifying one started refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshGen(u64);

/// The last-fetched entry set plus the state needed to keep it aligned
/// with the store.
#[derive(Debug, Clone)]
pub struct EntryCache {
    /// Prefix used for the full re-list.
    prefix: String,
    entries: Vec<Entry>,
    /// True until the next successful refresh installs fresh entries.
    stale: bool,
    /// Highest generation handed out by `begin_refresh`.
    started: u64,
    /// Highest generation that has resolved, successfully or not.
    resolved: u64,
}

impl EntryCache {
    /// An empty, stale cache over the root prefix.
    pub fn new() -> Self {
        Self::with_prefix("/")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            entries: Vec::new(),
            stale: true,
            started: 0,
            resolved: 0,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Changes the active prefix. The cached entries were fetched for the
    /// old prefix, so the cache becomes stale.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        if prefix != self.prefix {
            self.prefix = prefix;
            self.stale = true;
        }
    }

    /// Entries from the most recent completed fetch.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when a mutation has happened since the last completed refresh
    /// (or nothing has been fetched yet).
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// True while at least one started refresh has not yet resolved; the UI
    /// renders a loading state whenever this holds.
    pub fn is_refreshing(&self) -> bool {
        self.started > self.resolved
    }

    /// Marks the cache stale. Called after every successful mutation.
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    /// Starts a refresh and returns its generation token.
    pub fn begin_refresh(&mut self) -> RefreshGen {
        self.started += 1;
        RefreshGen(self.started)
    }

    /// Completes a refresh. Results install only when `generation` belongs to the
    /// most recently started refresh; completions of superseded refreshes
    /// are discarded. Returns whether the results were installed.
    pub fn complete_refresh(&mut self, generation: RefreshGen, entries: Vec<Entry>) -> bool {
        self.resolved = self.resolved.max(generation.0);
        if generation.0 != self.started {
            return false;
        }
        self.entries = entries;
        self.stale = false;
        true
    }

    /// Records that a refresh resolved with an error. The cached entries
    /// stay as they were and the cache remains stale.
    pub fn fail_refresh(&mut self, generation: RefreshGen) {
        self.resolved = self.resolved.max(generation.0);
    }

    /// Applies the in-memory substring filter to the cached entries.
    pub fn filter(&self, query: &str) -> Vec<&Entry> {
        filter_entries(&self.entries, query)
    }
}

impl Default for EntryCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive substring filter over the key field. A pure function
/// of (entries, query): a blank query keeps everything, and no store
/// round-trip happens per keystroke.
pub fn filter_entries<'a>(entries: &'a [Entry], query: &str) -> Vec<&'a Entry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| entry.key.to_lowercase().contains(&query))
        .collect()
}
