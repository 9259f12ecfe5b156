//! Integration tests for the document store.

use larder::{Query, Store, StoreConfig};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tempfile::TempDir;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct User {
    name: String,
    email: String,
    password: String,
}

fn test_store(dir: &TempDir) -> Store {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    Store::open(StoreConfig {
        path: dir.path().join("database"),
        create_if_missing: true,
    })
    .unwrap()
}

fn angel() -> User {
    User {
        name: "Angel".to_string(),
        email: "a@x.com".to_string(),
        password: "123456".to_string(),
    }
}

// --- Realistic Workflow Tests ---

#[test]
fn full_session_flow() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);
    let users = store.collection::<User>("users").unwrap();

    // Fresh collection is empty
    assert!(users.find_many(&Query::new()).unwrap().is_empty());

    let created = users.create(angel()).unwrap();
    assert!(!created.id.to_string().is_empty());

    let found = users
        .find_one(&Query::new().field("email", "a@x.com"))
        .unwrap()
        .unwrap();

    assert_eq!(found.data.name, "Angel");
    assert_eq!(found.data.email, "a@x.com");
    assert_eq!(found.data.password, "123456");
    assert_eq!(found.id, created.id);
}

#[test]
fn test_create_then_find_roundtrip() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);
    let users = store.collection::<User>("users").unwrap();

    let created = users.create(angel()).unwrap();
    let found = users.find_one(&Query::by_id(created.id)).unwrap().unwrap();

    assert_eq!(found, created);
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let id;

    {
        let store = test_store(&dir);
        let users = store.collection::<User>("users").unwrap();
        id = users.create(angel()).unwrap().id;
    }

    {
        let store = test_store(&dir);
        let users = store.collection::<User>("users").unwrap();
        let found = users.find_one(&Query::by_id(id)).unwrap().unwrap();
        assert_eq!(found.data, angel());
    }
}

#[test]
fn test_collections_are_independent() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);

    let users = store.collection::<User>("users").unwrap();
    let admins = store.collection::<User>("admins").unwrap();

    users.create(angel()).unwrap();

    assert_eq!(users.find_many(&Query::new()).unwrap().len(), 1);
    assert!(admins.find_many(&Query::new()).unwrap().is_empty());
}

#[test]
fn test_append_order_is_preserved() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);
    let users = store.collection::<User>("users").unwrap();

    for i in 0..25 {
        users
            .create(User {
                name: format!("user-{i}"),
                email: format!("u{i}@x.com"),
                password: "pw".to_string(),
            })
            .unwrap();
    }

    let all = users.find_many(&Query::new()).unwrap();
    let names: Vec<_> = all.iter().map(|u| u.data.name.as_str()).collect();
    let expected: Vec<String> = (0..25).map(|i| format!("user-{i}")).collect();

    assert_eq!(names, expected);
}

#[test]
fn test_find_many_filters_exactly() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);
    let users = store.collection::<User>("users").unwrap();

    users.create(angel()).unwrap();
    users
        .create(User {
            name: "Angel".to_string(),
            email: "other@x.com".to_string(),
            password: "123456".to_string(),
        })
        .unwrap();
    users
        .create(User {
            name: "Sam".to_string(),
            email: "sam@x.com".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();

    let angels = users
        .find_many(&Query::new().field("name", "Angel"))
        .unwrap();
    assert_eq!(angels.len(), 2);

    let one = users
        .find_many(&Query::new().field("name", "Angel").field("email", "a@x.com"))
        .unwrap();
    assert_eq!(one.len(), 1);

    let none = users
        .find_many(&Query::new().field("name", "Nobody"))
        .unwrap();
    assert!(none.is_empty());
}

// --- Dynamic Records ---

#[test]
fn test_untyped_collections() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);
    let events = store.collection::<Map<String, Value>>("events").unwrap();

    let mut payload = Map::new();
    payload.insert("kind".to_string(), json!("click"));
    payload.insert("count".to_string(), json!(3));
    let created = events.create(payload).unwrap();

    // Queried fields compare without coercion
    let hit = events.find_one(&Query::new().field("count", 3)).unwrap();
    assert_eq!(hit.unwrap().id, created.id);

    let miss = events.find_one(&Query::new().field("count", "3")).unwrap();
    assert!(miss.is_none());
}

// --- On-Disk Format ---

#[test]
fn test_file_layout_and_wire_shape() {
    let dir = TempDir::new().unwrap();
    let store = test_store(&dir);
    let users = store.collection::<User>("users").unwrap();

    let created = users.create(angel()).unwrap();

    let path = dir.path().join("database").join("users.json");
    let contents = std::fs::read_to_string(path).unwrap();
    let parsed: Vec<Map<String, Value>> = serde_json::from_str(&contents).unwrap();

    // One flat object per record, id stored as a plain string field
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0]["id"], json!(created.id.to_string()));
    assert_eq!(parsed[0]["name"], json!("Angel"));
    assert_eq!(parsed[0]["email"], json!("a@x.com"));
}
