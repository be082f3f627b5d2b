//! Classification and formatting of opaque value payloads.
//!
//! Values are stored as strings; some of them happen to be JSON. The
//! console offers a "normalize formatting" action that only applies when
//! the payload actually parses, so classification is an explicit parse
//! step returning a variant, never a dynamic guess.

use serde_json::Value;

/// Result of attempting to interpret a raw value payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    /// The payload parsed as JSON; the parsed document is carried along.
    Json(Value),
    /// Anything that did not parse: treated as plain text.
    Text,
}

impl ValueKind {
    pub fn is_json(&self) -> bool {
        matches!(self, ValueKind::Json(_))
    }
}

/// Attempts to parse a raw payload as JSON.
pub fn classify_value(raw: &str) -> ValueKind {
    match serde_json::from_str::<Value>(raw) {
        Ok(doc) => ValueKind::Json(doc),
        Err(_) => ValueKind::Text,
    }
}

/// Pretty-prints a payload when it parses as JSON; returns the input
/// unchanged otherwise. Idempotent: normalizing twice equals normalizing
/// once.
pub fn normalize_json(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(doc) => serde_json::to_string_pretty(&doc).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}
