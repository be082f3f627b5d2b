use etcdview_types::{ValueKind, classify_value, normalize_json};
use pretty_assertions::assert_eq;

#[test]
fn classify_detects_json_objects() {
    match classify_value(r#"{"a": 1}"#) {
        ValueKind::Json(doc) => assert_eq!(doc["a"], 1),
        ValueKind::Text => panic!("expected JSON"),
    }
}

#[test]
fn classify_treats_plain_text_as_text() {
    assert_eq!(classify_value("hello world"), ValueKind::Text);
    assert!(!classify_value("{not json").is_json());
}

#[test]
fn classify_accepts_scalar_json() {
    assert!(classify_value("42").is_json());
    assert!(classify_value("\"quoted\"").is_json());
    assert!(classify_value("null").is_json());
}

#[test]
fn normalize_pretty_prints_json() {
    let normalized = normalize_json(r#"{"b":2,"a":1}"#);
    assert!(normalized.contains('\n'));
    // Still the same document.
    let doc: serde_json::Value = serde_json::from_str(&normalized).unwrap();
    assert_eq!(doc["a"], 1);
    assert_eq!(doc["b"], 2);
}

#[test]
fn normalize_is_idempotent() {
    let once = normalize_json(r#"{"list":[1,2,3],"flag":true}"#);
    let twice = normalize_json(&once);
    assert_eq!(once, twice);
}

#[test]
fn normalize_leaves_plain_text_untouched() {
    assert_eq!(normalize_json("not json at all"), "not json at all");
    assert_eq!(normalize_json(""), "");
}
