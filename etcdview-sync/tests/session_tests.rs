use etcdview_sync::EditSession;
use etcdview_types::Entry;
use pretty_assertions::assert_eq;

fn entry(key: &str, value: &str, version: i64) -> Entry {
    Entry {
        key: key.to_string(),
        value: value.to_string(),
        version,
        create_revision: 1,
        mod_revision: version,
    }
}

// ── Transitions ─────────────────────────────────────────────────

#[test]
fn starts_closed() {
    let session = EditSession::default();
    assert!(!session.is_open());
    assert!(session.save_request().is_none());
}

#[test]
fn open_create_starts_with_empty_drafts() {
    let mut session = EditSession::default();
    session.open_create();

    assert!(session.is_open());
    assert!(!session.is_editing());
    assert_eq!(session.draft_value(), Some(""));
    // Empty draft key: saving is a no-op.
    assert!(session.save_request().is_none());
}

#[test]
fn open_edit_seeds_draft_from_entry() {
    let mut session = EditSession::default();
    session.open_edit(entry("/config/x", "hello", 1));

    assert!(session.is_editing());
    assert_eq!(session.draft_value(), Some("hello"));
    assert_eq!(
        session.save_request(),
        Some(("/config/x".to_string(), "hello".to_string()))
    );
}

#[test]
fn cancel_discards_draft_and_closes() {
    let mut session = EditSession::default();
    session.open_create();
    session.set_draft_key("/k");
    session.set_draft_value("v");

    session.cancel();
    assert!(!session.is_open());
    assert!(session.save_request().is_none());
}

// ── Draft rules ─────────────────────────────────────────────────

#[test]
fn creating_save_requires_non_empty_key() {
    let mut session = EditSession::default();
    session.open_create();

    session.set_draft_key("   ");
    session.set_draft_value("some value");
    assert!(session.save_request().is_none());

    session.set_draft_key("/config/new");
    assert_eq!(
        session.save_request(),
        Some(("/config/new".to_string(), "some value".to_string()))
    );
}

#[test]
fn editing_never_changes_the_key() {
    let mut session = EditSession::default();
    session.open_edit(entry("/original", "v1", 1));

    // Attempting to redraft the key is ignored by construction.
    session.set_draft_key("/hijacked");
    session.set_draft_value("v2");

    assert_eq!(
        session.save_request(),
        Some(("/original".to_string(), "v2".to_string()))
    );
}

#[test]
fn empty_value_is_a_valid_save() {
    let mut session = EditSession::default();
    session.open_create();
    session.set_draft_key("/k");

    assert_eq!(session.save_request(), Some(("/k".to_string(), String::new())));
}

#[test]
fn draft_updates_on_closed_session_are_ignored() {
    let mut session = EditSession::default();
    session.set_draft_key("/k");
    session.set_draft_value("v");
    assert!(session.save_request().is_none());
    assert_eq!(session.draft_value(), None);
}

// ── Confirmation ────────────────────────────────────────────────

#[test]
fn confirm_saved_shows_the_server_confirmed_entry() {
    let mut session = EditSession::default();
    session.open_edit(entry("/k", "old", 1));
    session.set_draft_value("new");

    session.confirm_saved(entry("/k", "new", 2));
    match &session {
        EditSession::Editing { entry, .. } => {
            assert_eq!(entry.version, 2);
            assert_eq!(entry.value, "new");
        }
        other => panic!("expected Editing, got {other:?}"),
    }

    session.close();
    assert!(!session.is_open());
}

#[test]
fn confirm_saved_on_closed_session_stays_closed() {
    let mut session = EditSession::default();
    session.confirm_saved(entry("/k", "v", 1));
    assert!(!session.is_open());
}

// ── Normalization ───────────────────────────────────────────────

#[test]
fn normalize_pretty_prints_json_drafts() {
    let mut session = EditSession::default();
    session.open_create();
    session.set_draft_key("/k");
    session.set_draft_value(r#"{"b":2,"a":1}"#);

    session.normalize_value();
    let normalized = session.draft_value().unwrap().to_string();
    assert!(normalized.contains('\n'));

    // Idempotent: a second pass changes nothing.
    session.normalize_value();
    assert_eq!(session.draft_value(), Some(normalized.as_str()));
}

#[test]
fn normalize_is_a_noop_on_plain_text() {
    let mut session = EditSession::default();
    session.open_create();
    session.set_draft_value("plain text, not json");

    session.normalize_value();
    assert_eq!(session.draft_value(), Some("plain text, not json"));
}
