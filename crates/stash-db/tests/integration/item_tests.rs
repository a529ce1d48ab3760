use serde_json::json;
use uuid::Uuid;

use stash_core::error::AppError;
use stash_core::models::{NewItem, NewUser};
use stash_core::traits::{ItemStore, UserStore};
use stash_db::Database;

use crate::integration::common::setup_test_db;

async fn create_owner(db: &Database, username: &str) -> Uuid {
    db.user_repo()
        .create_user(&NewUser {
            username: username.into(),
            password_hash: "hash".into(),
            salt: "salt".into(),
            iterations: 1_000,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn insert_and_list_preserves_document() {
    let (db, _container) = setup_test_db().await;
    let owner = create_owner(&db, "alice").await;
    let repo = db.item_repo();

    let body = json!({
        "title": "Dune",
        "pages": 412,
        "rating": 4.5,
        "tags": ["sf", "classic"],
        "meta": {"read": true, "note": null}
    });
    let id = repo
        .insert_item(&NewItem::new(owner, body.clone()).unwrap())
        .await
        .unwrap();

    let items = repo.list_by_owner(owner).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, id);
    assert_eq!(items[0].owner, owner);

    let doc = items[0].to_document();
    for (key, value) in body.as_object().unwrap() {
        assert_eq!(&doc[key], value, "field {key} changed");
    }
    assert_eq!(doc["owner"], json!(owner.to_string()));
}

#[tokio::test]
async fn list_is_scoped_to_owner_and_ordered() {
    let (db, _container) = setup_test_db().await;
    let alice = create_owner(&db, "alice").await;
    let bob = create_owner(&db, "bob").await;
    let repo = db.item_repo();

    for i in 0..3 {
        repo.insert_item(&NewItem::new(alice, json!({"index": i})).unwrap())
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    repo.insert_item(&NewItem::new(bob, json!({"index": 99})).unwrap())
        .await
        .unwrap();

    let alice_items = repo.list_by_owner(alice).await.unwrap();
    assert_eq!(alice_items.len(), 3);
    assert!(alice_items.iter().all(|i| i.owner == alice));
    assert_eq!(alice_items[0].fields["index"], 0);
    assert_eq!(alice_items[2].fields["index"], 2);

    let bob_items = repo.list_by_owner(bob).await.unwrap();
    assert_eq!(bob_items.len(), 1);
    assert_eq!(bob_items[0].fields["index"], 99);
}

#[tokio::test]
async fn list_for_owner_without_items_is_empty() {
    let (db, _container) = setup_test_db().await;
    let owner = create_owner(&db, "carol").await;

    assert!(db.item_repo().list_by_owner(owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn insert_for_unknown_owner_is_rejected() {
    let (db, _container) = setup_test_db().await;

    let err = db
        .item_repo()
        .insert_item(&NewItem::new(Uuid::new_v4(), json!({"x": 1})).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn jsonb_keeps_number_precision_and_client_id() {
    let (db, _container) = setup_test_db().await;
    let owner = create_owner(&db, "dave").await;
    let repo = db.item_repo();

    let body: serde_json::Value =
        serde_json::from_str(r#"{"id":7,"serial":12345678901234567890123,"price":1.10}"#).unwrap();
    let id = repo
        .insert_item(&NewItem::new(owner, body).unwrap())
        .await
        .unwrap();

    let doc = repo.list_by_owner(owner).await.unwrap()[0].to_document();
    let text = serde_json::to_string(&doc).unwrap();
    assert!(text.contains(r#""serial":12345678901234567890123"#), "{text}");
    assert!(text.contains(r#""price":1.10"#), "{text}");
    assert_eq!(doc["id"], json!(7));
    assert_eq!(doc["_id"], json!(id.to_string()));
}

#[tokio::test]
async fn escaped_nul_text_is_stored() {
    let (db, _container) = setup_test_db().await;
    let owner = create_owner(&db, "erin").await;
    let repo = db.item_repo();

    // A literal backslash-u sequence, not a NUL character
    let body = json!({"note": "a\\u0000b"});
    repo.insert_item(&NewItem::new(owner, body.clone()).unwrap())
        .await
        .unwrap();

    let items = repo.list_by_owner(owner).await.unwrap();
    assert_eq!(items[0].fields["note"], body["note"]);
}
