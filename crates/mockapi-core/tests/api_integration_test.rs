use mockapi_core::config::seed::Seed;
use mockapi_core::storage::{MemoryStorage, Storage};
use mockapi_core::types::collection::EntityKind;
use mockapi_core::types::relation::Relation;
use mockapi_core::{ApiError, MockServer, Request};
use rstest::{fixture, rstest};
use serde_json::{json, Value};

#[fixture]
fn storage() -> MemoryStorage {
    MemoryStorage::new()
}

fn server(storage: &MemoryStorage) -> MockServer {
    MockServer::new(Seed::default(), Box::new(storage.clone()))
}

fn persisted_relations(storage: &MemoryStorage) -> Vec<Relation> {
    let content = storage
        .get_item("relations")
        .unwrap()
        .unwrap_or_else(|| "[]".to_owned());
    serde_json::from_str(&content).unwrap()
}

#[rstest]
fn test_user_group_lifecycle(storage: MemoryStorage) {
    let mut server = server(&storage);

    let user = server
        .post(&Request::new("/api/users/create").with_data(json!({"name": "A"})))
        .unwrap();
    assert_eq!(user, json!({"id": "user1", "name": "A"}));

    let group = server
        .post(&Request::new("/api/groups/create").with_data(json!({"name": "G"})))
        .unwrap();
    assert_eq!(group, json!({"id": "group1", "name": "G"}));

    let added = server
        .post(&Request::new("/api/users/user1/group/group1/add"))
        .unwrap();
    assert_eq!(added, json!({}));
    assert_eq!(server.store().relations().len(), 1);
    assert_eq!(persisted_relations(&storage).len(), 1);

    let err = server
        .post(&Request::new("/api/users/user1/group/group1/add"))
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
    assert_eq!(err.status(), 400);
    assert_eq!(server.store().relations().len(), 1);

    let deleted = server.del(&Request::new("/api/users/user1/delete")).unwrap();
    assert_eq!(deleted, user);
    assert!(server.store().relations().is_empty());
    assert!(persisted_relations(&storage).is_empty());
}

#[rstest]
fn test_group_delete_blocked_until_empty(storage: MemoryStorage) {
    let mut server = server(&storage);
    server.post(&Request::new("/api/users/create")).unwrap();
    server.post(&Request::new("/api/users/create")).unwrap();
    server.post(&Request::new("/api/groups/create")).unwrap();
    server
        .post(&Request::new("/api/users/user1/group/group1/add"))
        .unwrap();
    server
        .post(&Request::new("/api/groups/group1/user/user2/add"))
        .unwrap();

    let members = server.get(&Request::new("/api/groups/group1/users")).unwrap();
    assert_eq!(members, json!([{"id": "user1"}, {"id": "user2"}]));

    let err = server
        .del(&Request::new("/api/groups/group1/delete"))
        .unwrap_err();
    assert_eq!(err.status(), 400);

    server
        .del(&Request::new("/api/users/user1/group/group1/delete"))
        .unwrap();
    server.del(&Request::new("/api/users/user2/delete")).unwrap();

    let deleted = server.del(&Request::new("/api/groups/group1/delete")).unwrap();
    assert_eq!(deleted, json!({"id": "group1"}));
    assert!(server.store().records(EntityKind::Group).is_empty());
    assert_eq!(storage.get_item("groups").unwrap().as_deref(), Some("[]"));
}

#[rstest]
fn test_created_ids_skip_seeded_ids(storage: MemoryStorage) {
    let seed: Seed = serde_json::from_value(json!({
        "users": [{"id": "user1"}, {"id": "user3"}]
    }))
    .unwrap();
    let mut server = MockServer::new(seed, Box::new(storage.clone()));

    let ids: Vec<Value> = (0..3)
        .map(|_| server.post(&Request::new("/api/users/create")).unwrap()["id"].clone())
        .collect();
    assert_eq!(ids, [json!("user2"), json!("user4"), json!("user5")]);
}

#[rstest]
#[case("/api/users/user9/update", json!({"name": "x"}))]
#[case("/api/groups/group9/update", json!({"name": "x"}))]
#[case("/api/users/user9/delete", Value::Null)]
#[case("/api/groups/group9/delete", Value::Null)]
#[case("/api/users/user1/group/group1/delete", Value::Null)]
fn test_bad_requests(storage: MemoryStorage, #[case] url: &str, #[case] data: Value) {
    let mut server = server(&storage);
    let err = server
        .patch(&Request::new(url).with_data(data))
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
    assert!(storage.is_empty());
}

#[rstest]
#[case("/api/unknown")]
#[case("/users")]
#[case("/api/usersX")]
fn test_unmatched_urls(storage: MemoryStorage, #[case] url: &str) {
    let mut server = server(&storage);
    let err = server.get(&Request::new(url)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(err.status(), 404);
}
