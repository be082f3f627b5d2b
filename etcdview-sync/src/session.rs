//! Edit-session state machine for the key drawer.
//!
//! The session is `Closed`, `Creating` a new key, or `Editing` an existing
//! entry. When editing, the key is not draftable at all: only the value can
//! change, so key immutability holds by construction rather than by
//! validation.

use etcdview_types::{Entry, normalize_json};

/// Transient drawer state and the draft being composed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSession {
    /// No selection; the drawer is closed.
    #[default]
    Closed,
    /// Composing a brand-new key; both drafts start empty.
    Creating { draft_key: String, draft_value: String },
    /// Editing the value of an existing entry.
    Editing { entry: Entry, draft_value: String },
}

impl EditSession {
    // ── Transitions ─────────────────────────────────────────────

    /// Opens the drawer for a new key.
    pub fn open_create(&mut self) {
        *self = EditSession::Creating {
            draft_key: String::new(),
            draft_value: String::new(),
        };
    }

    /// Opens the drawer on an existing entry; the draft value starts at the
    /// entry's current value.
    pub fn open_edit(&mut self, entry: Entry) {
        let draft_value = entry.value.clone();
        *self = EditSession::Editing { entry, draft_value };
    }

    /// Closes the drawer, discarding any draft.
    pub fn cancel(&mut self) {
        *self = EditSession::Closed;
    }

    /// Closes the drawer after a confirmed save.
    pub fn close(&mut self) {
        *self = EditSession::Closed;
    }

    /// Replaces the shown entry with the server-confirmed one after a save,
    /// so the user sees the store-assigned version before the drawer
    /// closes. No-op when the drawer is closed.
    pub fn confirm_saved(&mut self, confirmed: Entry) {
        if !matches!(self, EditSession::Closed) {
            let draft_value = confirmed.value.clone();
            *self = EditSession::Editing {
                entry: confirmed,
                draft_value,
            };
        }
    }

    // ── Drafts ──────────────────────────────────────────────────

    /// Updates the draft key. Only meaningful while creating; when editing,
    /// the key is immutable and the update is ignored.
    pub fn set_draft_key(&mut self, key: impl Into<String>) {
        if let EditSession::Creating { draft_key, .. } = self {
            *draft_key = key.into();
        }
    }

    /// Updates the draft value while the drawer is open.
    pub fn set_draft_value(&mut self, value: impl Into<String>) {
        match self {
            EditSession::Creating { draft_value, .. }
            | EditSession::Editing { draft_value, .. } => *draft_value = value.into(),
            EditSession::Closed => {}
        }
    }

    pub fn draft_value(&self) -> Option<&str> {
        match self {
            EditSession::Creating { draft_value, .. }
            | EditSession::Editing { draft_value, .. } => Some(draft_value),
            EditSession::Closed => None,
        }
    }

    /// Pretty-prints the draft value when it parses as JSON; otherwise the
    /// draft is left untouched.
    pub fn normalize_value(&mut self) {
        match self {
            EditSession::Creating { draft_value, .. }
            | EditSession::Editing { draft_value, .. } => {
                *draft_value = normalize_json(draft_value);
            }
            EditSession::Closed => {}
        }
    }

    // ── Save ────────────────────────────────────────────────────

    /// The (key, value) a save would put, or `None` when saving is a no-op:
    /// the drawer is closed, or a new key's draft is empty/whitespace
    /// (validation failure, not an error report). When editing, the key is
    /// always the original entry's key.
    pub fn save_request(&self) -> Option<(String, String)> {
        match self {
            EditSession::Closed => None,
            EditSession::Creating {
                draft_key,
                draft_value,
            } => {
                let key = draft_key.trim();
                if key.is_empty() {
                    None
                } else {
                    Some((key.to_string(), draft_value.clone()))
                }
            }
            EditSession::Editing { entry, draft_value } => {
                Some((entry.key.clone(), draft_value.clone()))
            }
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, EditSession::Closed)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }
}
