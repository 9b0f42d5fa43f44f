use hbnb_types::EntityId;
use std::collections::HashSet;

// ── EntityId ──────────────────────────────────────────────────────

#[test]
fn entity_id_new_is_unique() {
    let a = EntityId::new();
    let b = EntityId::new();
    assert_ne!(a, b);
}

#[test]
fn entity_id_is_canonical_uuid_v4() {
    let id = EntityId::new();
    let parsed = uuid::Uuid::parse_str(id.as_str()).unwrap();
    assert_eq!(parsed.get_version_num(), 4);
    assert_eq!(id.as_str(), parsed.hyphenated().to_string());
    assert_eq!(id.as_str(), id.as_str().to_lowercase());
    assert_eq!(id.as_str().len(), 36);
}

#[test]
fn entity_id_from_string_is_opaque() {
    let id = EntityId::from_string("not-a-uuid");
    assert_eq!(id.as_str(), "not-a-uuid");
    assert_eq!(id.to_string(), "not-a-uuid");
}

#[test]
fn entity_id_default_is_unique() {
    let a = EntityId::default();
    let b = EntityId::default();
    assert_ne!(a, b);
}

#[test]
fn entity_id_hash_and_eq() {
    let id = EntityId::new();
    let mut set = HashSet::new();
    set.insert(id.clone());
    set.insert(id); // duplicate
    assert_eq!(set.len(), 1);
}

#[test]
fn entity_id_serializes_as_plain_string() {
    let id = EntityId::from("abc-123");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, r#""abc-123""#);
    let back: EntityId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn entity_id_into_string() {
    let id = EntityId::from(String::from("xyz"));
    assert_eq!(id.into_string(), "xyz");
}
