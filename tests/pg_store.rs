//! PostgreSQL store tests
//!
//! Skipped unless `TEST_DATABASE_URL` points at a disposable database.
//! Everything runs in one test so the table truncation cannot race.

mod common;

use common::database::create_test_pool;
use postfeed::backend::store::{FeedStore, NewIdentity, NewPost, PgFeedStore, PostChanges, StoreError};
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn new_post(creator_id: Uuid, title: &str, image: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: "content".to_string(),
        image_url: image.to_string(),
        creator_id,
    }
}

#[tokio::test]
async fn test_pg_feed_store() {
    let Some(pool) = create_test_pool().await else {
        eprintln!("TEST_DATABASE_URL not set, skipping PostgreSQL store test");
        return;
    };
    let store = PgFeedStore::new(pool);

    // Identities
    let identity = store
        .create_identity(NewIdentity {
            email: "max@example.com".to_string(),
            password_hash: "hash".to_string(),
            name: "Max".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(identity.status, "I am new!");
    assert!(identity.post_ids.is_empty());

    let duplicate = store
        .create_identity(NewIdentity {
            email: "max@example.com".to_string(),
            password_hash: "hash".to_string(),
            name: "Other".to_string(),
        })
        .await;
    assert!(matches!(duplicate, Err(StoreError::DuplicateEmail(_))));

    let orphan = store.create_post(new_post(Uuid::new_v4(), "Orphan", "images/o.png")).await;
    assert!(matches!(orphan, Err(StoreError::MissingIdentity(_))));

    // Pagination
    let mut ids = Vec::new();
    for n in 1..=5 {
        let post = store
            .create_post(new_post(identity.id, &format!("Post {}", n), "images/a.png"))
            .await
            .unwrap();
        assert!(store.push_owned_post(identity.id, post.id).await.unwrap());
        ids.push(post.id);
    }
    assert_eq!(store.count_posts().await.unwrap(), 5);
    let page: Vec<String> = store
        .find_posts_page(2, 2)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(page, vec!["Post 3".to_string(), "Post 2".to_string()]);

    let reloaded = store.find_identity_by_id(identity.id).await.unwrap().unwrap();
    assert_eq!(reloaded.post_ids, ids);

    // Atomic update reports the replaced image
    let updated = store
        .update_post(
            ids[0],
            PostChanges {
                title: "Renamed".to_string(),
                content: "changed".to_string(),
                image_url: Some("images/b.png".to_string()),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.previous_image_url, "images/a.png");
    assert_eq!(updated.orphaned_image(), Some("images/a.png"));

    let kept = store
        .update_post(
            ids[0],
            PostChanges {
                title: "Renamed again".to_string(),
                content: "changed".to_string(),
                image_url: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.post.image_url, "images/b.png");
    assert_eq!(kept.orphaned_image(), None);

    let view = store.find_post_with_creator(ids[0]).await.unwrap().unwrap();
    assert_eq!(view.creator.name, "Max");

    // Delete once
    assert!(store.delete_post(ids[0]).await.unwrap().is_some());
    assert!(store.delete_post(ids[0]).await.unwrap().is_none());
    assert!(store.pull_owned_post(identity.id, ids[0]).await.unwrap());
    let reloaded = store.find_identity_by_id(identity.id).await.unwrap().unwrap();
    assert!(!reloaded.post_ids.contains(&ids[0]));

    // Status
    let mut changed = reloaded.clone();
    changed.status = "Busy".to_string();
    assert!(store.update_identity(&changed).await.unwrap());
    let reloaded = store.find_identity_by_email("max@example.com").await.unwrap().unwrap();
    assert_eq!(reloaded.status, "Busy");
}
