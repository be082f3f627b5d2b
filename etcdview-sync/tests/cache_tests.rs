use etcdview_sync::{EntryCache, filter_entries};
use etcdview_types::Entry;

fn entry(key: &str) -> Entry {
    Entry {
        key: key.to_string(),
        value: "v".to_string(),
        version: 1,
        create_revision: 1,
        mod_revision: 1,
    }
}

// ── Staleness ───────────────────────────────────────────────────

#[test]
fn new_cache_is_stale_and_empty() {
    let cache = EntryCache::new();
    assert!(cache.is_stale());
    assert!(cache.is_empty());
    assert!(!cache.is_refreshing());
    assert_eq!(cache.prefix(), "/");
}

#[test]
fn with_prefix_starts_stale_over_that_prefix() {
    let cache = EntryCache::with_prefix("/config");
    assert_eq!(cache.prefix(), "/config");
    assert!(cache.is_stale());
}

#[test]
fn completed_refresh_clears_staleness() {
    let mut cache = EntryCache::new();
    let generation = cache.begin_refresh();
    assert!(cache.is_refreshing());

    assert!(cache.complete_refresh(generation, vec![entry("/a")]));
    assert!(!cache.is_stale());
    assert!(!cache.is_refreshing());
    assert_eq!(cache.len(), 1);
}

#[test]
fn mutation_marks_cache_stale_again() {
    let mut cache = EntryCache::new();
    let generation = cache.begin_refresh();
    cache.complete_refresh(generation, vec![entry("/a")]);

    cache.mark_stale();
    assert!(cache.is_stale());
    // The previous fetch is still shown while the refresh is pending.
    assert_eq!(cache.len(), 1);
}

#[test]
fn changing_prefix_marks_stale() {
    let mut cache = EntryCache::new();
    let generation = cache.begin_refresh();
    cache.complete_refresh(generation, vec![entry("/a")]);

    cache.set_prefix("/config");
    assert!(cache.is_stale());
    assert_eq!(cache.prefix(), "/config");

    // Same prefix again is a no-op.
    let generation = cache.begin_refresh();
    cache.complete_refresh(generation, vec![]);
    cache.set_prefix("/config");
    assert!(!cache.is_stale());
}

// ── Generations: last refresh started wins ──────────────────────

#[test]
fn superseded_refresh_completion_is_discarded() {
    let mut cache = EntryCache::new();
    let first = cache.begin_refresh();
    let second = cache.begin_refresh();

    // The newer refresh resolves first and installs.
    assert!(cache.complete_refresh(second, vec![entry("/new")]));
    // The older one resolves late; its results must not overwrite.
    assert!(!cache.complete_refresh(first, vec![entry("/old")]));

    let keys: Vec<&str> = cache.entries().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["/new"]);
    assert!(!cache.is_stale());
}

#[test]
fn latest_refresh_wins_regardless_of_resolution_order() {
    let mut cache = EntryCache::new();
    let first = cache.begin_refresh();
    let second = cache.begin_refresh();

    assert!(!cache.complete_refresh(first, vec![entry("/old")]));
    assert!(cache.is_refreshing());
    assert!(cache.complete_refresh(second, vec![entry("/new")]));
    assert!(!cache.is_refreshing());

    let keys: Vec<&str> = cache.entries().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["/new"]);
}

#[test]
fn failed_refresh_keeps_previous_entries_and_staleness() {
    let mut cache = EntryCache::new();
    let generation = cache.begin_refresh();
    cache.complete_refresh(generation, vec![entry("/a")]);

    cache.mark_stale();
    let generation = cache.begin_refresh();
    cache.fail_refresh(generation);

    assert!(cache.is_stale());
    assert!(!cache.is_refreshing());
    assert_eq!(cache.len(), 1);
}

// ── Filtering ───────────────────────────────────────────────────

#[test]
fn filter_is_a_pure_substring_match_on_keys() {
    let entries = vec![entry("/a"), entry("/b")];
    let hits = filter_entries(&entries, "a");
    let keys: Vec<&str> = hits.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["/a"]);
}

#[test]
fn filter_is_case_insensitive() {
    let entries = vec![entry("/Config/Max"), entry("/other")];
    assert_eq!(filter_entries(&entries, "CONFIG").len(), 1);
    assert_eq!(filter_entries(&entries, "max").len(), 1);
}

#[test]
fn blank_query_keeps_everything() {
    let entries = vec![entry("/a"), entry("/b")];
    assert_eq!(filter_entries(&entries, "").len(), 2);
    assert_eq!(filter_entries(&entries, "   ").len(), 2);
}

#[test]
fn filter_with_no_hits_is_empty() {
    let entries = vec![entry("/a")];
    assert!(filter_entries(&entries, "zzz").is_empty());
}

#[test]
fn cache_filter_matches_free_function() {
    let mut cache = EntryCache::new();
    let generation = cache.begin_refresh();
    cache.complete_refresh(generation, vec![entry("/a"), entry("/b")]);

    let keys: Vec<&str> = cache.filter("b").iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["/b"]);
}
