use practice_core::model::{CategoryId, ProfileId, ProgressBook};
use storage::progress::progress_key;
use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteStore;

fn id(raw: &str) -> CategoryId {
    CategoryId::new(raw).unwrap()
}

#[tokio::test]
async fn sqlite_kv_roundtrip_upserts_and_removes() {
    let store = SqliteStore::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    assert_eq!(store.load("missing").await.unwrap(), None);
    store.save("greeting", "hello").await.unwrap();
    store.save("greeting", "hi").await.unwrap();
    assert_eq!(store.load("greeting").await.unwrap().as_deref(), Some("hi"));

    store.remove("greeting").await.unwrap();
    store.remove("greeting").await.unwrap();
    assert_eq!(store.load("greeting").await.unwrap(), None);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let store = SqliteStore::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("first migrate");
    store.save("k", "v").await.unwrap();
    store.migrate().await.expect("second migrate");
    assert_eq!(store.load("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn progress_snapshot_survives_sqlite_roundtrip() {
    let storage = Storage::sqlite("sqlite:file:memdb_progress?mode=memory&cache=shared")
        .await
        .expect("storage");
    let repo = storage.progress("year9");
    let hudson = ProfileId::new("hudson").unwrap();

    let mut book = ProgressBook::new();
    for correct in [true, true, false, true] {
        book.record_attempt(&id("number"), "Number", correct);
    }
    book.record_attempt(&id("geometry"), "Geometry", false);

    repo.save_progress(&hudson, &book).await.unwrap();
    repo.save_previous_count(&hudson, 5).await.unwrap();

    let loaded = repo.load_progress(&hudson).await;
    for (category, record) in book.iter() {
        let reloaded = loaded.get(category).expect("category reloaded");
        assert_eq!(
            (reloaded.correct(), reloaded.attempted()),
            (record.correct(), record.attempted())
        );
    }
    assert_eq!(loaded.len(), book.len());
    assert_eq!(repo.load_previous_count(&hudson).await, 5);
}

#[tokio::test]
async fn corrupt_sqlite_blob_degrades_to_empty() {
    let storage = Storage::sqlite("sqlite:file:memdb_corrupt?mode=memory&cache=shared")
        .await
        .expect("storage");
    let baxter = ProfileId::new("baxter").unwrap();
    storage
        .store
        .save(&progress_key("year9", &baxter), "[1, 2")
        .await
        .unwrap();

    let repo = storage.progress("year9");
    assert!(repo.load_progress(&baxter).await.is_empty());
    assert_eq!(storage.store.load(&progress_key("year9", &baxter)).await.unwrap(), None);
}
