mod common;

use common::{store_path, temp_console};
use hbnb_console::{CommandError, Console};
use hbnb_storage::FileStorage;
use hbnb_types::TypeTag;
use pretty_assertions::assert_eq;
use serde_json::json;

// ── create / show ────────────────────────────────────────────────

#[test]
fn create_then_show_for_every_type() {
    let (_dir, mut console) = temp_console();
    for tag in TypeTag::ALL {
        let id = console.create(tag.as_str()).unwrap();
        let shown = console.show(tag.as_str(), id.as_str()).unwrap();
        assert!(shown.starts_with(&format!("[{tag}] ({id}) {{")), "{shown}");
    }
}

#[test]
fn create_persists_immediately() {
    let (dir, mut console) = temp_console();
    let id = console.create("User").unwrap();
    let reopened = FileStorage::open(store_path(&dir)).unwrap();
    assert!(reopened.find(TypeTag::User, id.as_str()).is_some());
}

#[test]
fn create_unknown_type() {
    let (_dir, mut console) = temp_console();
    assert!(matches!(console.create("MyModel"), Err(CommandError::UnknownType(_))));
    assert!(console.storage().is_empty());
}

#[test]
fn show_missing_instance() {
    let (_dir, console) = temp_console();
    assert!(matches!(console.show("User", "nope"), Err(CommandError::NotFound(_))));
}

#[test]
fn show_with_wrong_class_is_not_found() {
    let (_dir, mut console) = temp_console();
    let id = console.create("User").unwrap();
    assert!(matches!(console.show("Place", id.as_str()), Err(CommandError::NotFound(_))));
}

// ── destroy ──────────────────────────────────────────────────────

#[test]
fn destroy_removes_and_decrements_count() {
    let (dir, mut console) = temp_console();
    let id = console.create("City").unwrap();
    console.create("City").unwrap();
    assert_eq!(console.count("City").unwrap(), 2);

    console.destroy("City", id.as_str()).unwrap();
    assert_eq!(console.count("City").unwrap(), 1);
    assert!(matches!(console.show("City", id.as_str()), Err(CommandError::NotFound(_))));

    let reopened = FileStorage::open(store_path(&dir)).unwrap();
    assert_eq!(reopened.count(TypeTag::City), 1);
}

#[test]
fn destroy_missing_instance() {
    let (_dir, mut console) = temp_console();
    assert!(matches!(console.destroy("City", "x"), Err(CommandError::NotFound(_))));
}

// ── all / count ──────────────────────────────────────────────────

#[test]
fn all_lists_everything_or_one_class() {
    let (_dir, mut console) = temp_console();
    console.create("User").unwrap();
    console.create("State").unwrap();
    console.create("State").unwrap();

    assert_eq!(console.all(None).unwrap().len(), 3);
    let states = console.all(Some("State")).unwrap();
    assert_eq!(states.len(), 2);
    assert!(states.iter().all(|s| s.starts_with("[State]")));
}

#[test]
fn all_unknown_class() {
    let (_dir, console) = temp_console();
    assert!(matches!(console.all(Some("Nope")), Err(CommandError::UnknownType(_))));
}

#[test]
fn count_empty_class_is_zero() {
    let (_dir, console) = temp_console();
    assert_eq!(console.count("Review").unwrap(), 0);
}

// ── update ───────────────────────────────────────────────────────

#[test]
fn update_coerces_values() {
    let (_dir, mut console) = temp_console();
    let id = console.create("User").unwrap();
    console.update("User", id.as_str(), "age", "20").unwrap();
    console.update("User", id.as_str(), "height", "1.68").unwrap();
    console.update("User", id.as_str(), "name", "Monty").unwrap();

    let e = console.storage().find(TypeTag::User, id.as_str()).unwrap();
    assert_eq!(e.attribute("age"), Some(&json!(20)));
    assert_eq!(e.attribute("height"), Some(&json!(1.68)));
    assert_eq!(e.attribute("name"), Some(&json!("Monty")));
}

#[test]
fn update_advances_updated_at_and_persists() {
    let (dir, mut console) = temp_console();
    let id = console.create("Place").unwrap();
    let before = console.storage().find(TypeTag::Place, id.as_str()).unwrap().updated_at();
    std::thread::sleep(std::time::Duration::from_millis(2));
    console.update("Place", id.as_str(), "max_guest", "4").unwrap();

    let reopened = FileStorage::open(store_path(&dir)).unwrap();
    let e = reopened.find(TypeTag::Place, id.as_str()).unwrap();
    assert!(e.updated_at() > before);
    assert_eq!(e.attribute("max_guest"), Some(&json!(4)));
}

#[test]
fn update_missing_instance() {
    let (_dir, mut console) = temp_console();
    assert!(matches!(
        console.update("User", "nope", "name", "x"),
        Err(CommandError::NotFound(_))
    ));
}

#[test]
fn update_identity_field_is_rejected() {
    let (_dir, mut console) = temp_console();
    let id = console.create("User").unwrap();
    assert!(matches!(
        console.update("User", id.as_str(), "id", "other"),
        Err(CommandError::ReadOnlyAttribute(_))
    ));
    assert!(console.show("User", id.as_str()).is_ok());
}

#[test]
fn update_many_is_all_or_nothing() {
    let (_dir, mut console) = temp_console();
    let id = console.create("State").unwrap();
    let attrs = json!({"name": "Texas", "created_at": "now"});
    let serde_json::Value::Object(attrs) = attrs else { unreachable!() };
    assert!(console.update_many("State", id.as_str(), attrs).is_err());
    let e = console.storage().find(TypeTag::State, id.as_str()).unwrap();
    assert_eq!(e.attribute("name"), None);
}

#[test]
fn update_many_keeps_json_types() {
    let (_dir, mut console) = temp_console();
    let id = console.create("Place").unwrap();
    let serde_json::Value::Object(attrs) = json!({"name": "Loft", "number_rooms": 3, "price": "12"})
    else {
        unreachable!()
    };
    console.update_many("Place", id.as_str(), attrs).unwrap();
    let e = console.storage().find(TypeTag::Place, id.as_str()).unwrap();
    assert_eq!(e.attribute("number_rooms"), Some(&json!(3)));
    assert_eq!(e.attribute("price"), Some(&json!("12")));
}

// ── failed saves ─────────────────────────────────────────────────

/// A console whose store directory has been removed after one User was created.
fn console_with_vanished_dir() -> (tempfile::TempDir, Console, String) {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).unwrap();
    let mut console = Console::new(FileStorage::open(sub.join("objects.json")).unwrap());
    let id = console.create("User").unwrap().into_string();
    std::fs::remove_dir_all(&sub).unwrap();
    (dir, console, id)
}

#[test]
fn failed_update_leaves_entity_unchanged() {
    let (_dir, mut console, id) = console_with_vanished_dir();
    let before = console.storage().find(TypeTag::User, &id).unwrap().clone();

    let err = console.update("User", &id, "name", "Ghost").unwrap_err();
    assert!(matches!(err, CommandError::Storage(_)));
    assert_eq!(console.storage().find(TypeTag::User, &id), Some(&before));
}

#[test]
fn failed_create_registers_nothing() {
    let (_dir, mut console, _id) = console_with_vanished_dir();
    assert!(matches!(console.create("User"), Err(CommandError::Storage(_))));
    assert_eq!(console.count("User").unwrap(), 1);
}

#[test]
fn failed_destroy_keeps_entity() {
    let (_dir, mut console, id) = console_with_vanished_dir();
    assert!(matches!(console.destroy("User", &id), Err(CommandError::Storage(_))));
    assert!(console.show("User", &id).is_ok());
    assert_eq!(console.count("User").unwrap(), 1);
}

// ── lifecycle ────────────────────────────────────────────────────

#[test]
fn into_storage_returns_the_store() {
    let (_dir, mut console) = temp_console();
    console.create("Amenity").unwrap();
    let storage = console.into_storage();
    assert_eq!(storage.count(TypeTag::Amenity), 1);
    let console = Console::new(storage);
    assert_eq!(console.count("Amenity").unwrap(), 1);
}
