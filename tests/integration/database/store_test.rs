//! PostgreSQL document store tests
//!
//! Require a database reachable through `DATABASE_URL`.

use docsync::backend::store::DocumentStore;
use docsync::shared::Document;
use serial_test::serial;

use crate::common::{cleanup_test_data, create_test_store};

#[tokio::test]
#[ignore]
#[serial]
async fn test_pg_save_is_version_gated() {
    let store = create_test_store().await;
    cleanup_test_data(&store).await.unwrap();

    assert!(store.save(&Document::with_content("doc1", &b"two"[..], 2)).await.unwrap());
    assert!(!store.save(&Document::with_content("doc1", &b"one"[..], 1)).await.unwrap());
    assert!(!store.save(&Document::with_content("doc1", &b"tie"[..], 2)).await.unwrap());
    assert!(store.save(&Document::with_content("doc1", &b"three"[..], 3)).await.unwrap());

    let stored = store.get("doc1").await.unwrap().unwrap();
    assert_eq!(stored.version, 3);
    assert_eq!(&stored.content[..], b"three");
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_pg_list_after_orders_by_version() {
    let store = create_test_store().await;
    cleanup_test_data(&store).await.unwrap();

    for (id, version) in [("b", 4), ("a", 9), ("c", 1)] {
        store.save(&Document::with_content(id, &b""[..], version)).await.unwrap();
    }

    let ids: Vec<String> = store
        .list_after(1)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_pg_get_missing_is_none() {
    let store = create_test_store().await;
    cleanup_test_data(&store).await.unwrap();

    assert!(store.get("nope").await.unwrap().is_none());
}
