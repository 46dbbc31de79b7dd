use serde_json::json;
use storage::repository::{KeyValueStore, StorageError, StoreKey};
use storage::sqlite::SqliteStore;

async fn connect(name: &str) -> SqliteStore {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let store = SqliteStore::connect(&url).await.expect("connect");
    store.migrate().await.expect("migrate");
    store
}

#[tokio::test]
async fn sqlite_round_trips_json_documents() {
    let store = connect("memdb_kv_roundtrip").await;

    let analytics = json!({"history": [{"difficulty": "easy", "score": 1}]});
    store.set(StoreKey::Analytics, &analytics).await.unwrap();
    store.set(StoreKey::Theme, &json!("dark")).await.unwrap();

    assert_eq!(store.get(StoreKey::Analytics).await.unwrap(), Some(analytics));
    assert_eq!(store.get(StoreKey::Theme).await.unwrap(), Some(json!("dark")));
    assert_eq!(store.get(StoreKey::User).await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_set_replaces_and_remove_deletes() {
    let store = connect("memdb_kv_replace").await;

    store.set(StoreKey::User, &json!("Ada")).await.unwrap();
    store.set(StoreKey::User, &json!("Grace")).await.unwrap();
    assert_eq!(store.get(StoreKey::User).await.unwrap(), Some(json!("Grace")));

    store.remove(StoreKey::User).await.unwrap();
    assert_eq!(store.get(StoreKey::User).await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_reports_malformed_entries() {
    let store = connect("memdb_kv_malformed").await;

    sqlx::query("INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)")
        .bind(StoreKey::Questions.name())
        .bind("{\"nodejs\": ")
        .bind("2024-01-01T00:00:00Z")
        .execute(store.pool())
        .await
        .unwrap();

    let err = store.get(StoreKey::Questions).await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let store = connect("memdb_kv_migrate_twice").await;
    store.migrate().await.expect("second migrate");
    store.set(StoreKey::Theme, &json!("light")).await.unwrap();
}
