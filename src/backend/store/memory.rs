/**
 * In-Memory Feed Store
 *
 * Keeps identities and posts in `HashMap`s behind a single tokio `RwLock`.
 * Every write takes the lock once, so each trait operation is atomic with
 * respect to the others. Used when `DATABASE_URL` is not configured and by
 * the test suites.
 */
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::store::models::{
    Identity, NewIdentity, NewPost, Post, PostChanges, UpdatedPost, DEFAULT_STATUS,
};
use crate::backend::store::{page_offset, FeedStore, StoreError};
use crate::shared::post::PostView;

struct StoredPost {
    post: Post,
    /// Insertion order, breaks ties between equal `created_at` values
    seq: u64,
}

#[derive(Default)]
struct MemoryState {
    identities: HashMap<Uuid, Identity>,
    posts: HashMap<Uuid, StoredPost>,
    next_seq: u64,
}

impl MemoryState {
    fn view(&self, post: &Post) -> Option<PostView> {
        let creator = self.identities.get(&post.creator_id)?;
        Some(post.clone().into_view(creator.summary()))
    }
}

/// Feed store backed by process memory
#[derive(Default)]
pub struct MemoryFeedStore {
    state: RwLock<MemoryState>,
}

impl MemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedStore for MemoryFeedStore {
    async fn create_identity(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        let mut state = self.state.write().await;
        if state.identities.values().any(|i| i.email == identity.email) {
            return Err(StoreError::DuplicateEmail(identity.email));
        }

        let now = Utc::now();
        let created = Identity {
            id: Uuid::new_v4(),
            email: identity.email,
            password_hash: identity.password_hash,
            name: identity.name,
            status: DEFAULT_STATUS.to_string(),
            post_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        state.identities.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let state = self.state.read().await;
        Ok(state.identities.values().find(|i| i.email == email).cloned())
    }

    async fn find_identity_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
        Ok(self.state.read().await.identities.get(&id).cloned())
    }

    async fn update_identity(&self, identity: &Identity) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.identities.get_mut(&identity.id) {
            Some(stored) => {
                stored.name = identity.name.clone();
                stored.status = identity.status.clone();
                stored.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn push_owned_post(&self, identity_id: Uuid, post_id: Uuid) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.identities.get_mut(&identity_id) {
            Some(identity) => {
                identity.post_ids.push(post_id);
                identity.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull_owned_post(&self, identity_id: Uuid, post_id: Uuid) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        match state.identities.get_mut(&identity_id) {
            Some(identity) => {
                identity.post_ids.retain(|id| *id != post_id);
                identity.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut state = self.state.write().await;
        if !state.identities.contains_key(&post.creator_id) {
            return Err(StoreError::MissingIdentity(post.creator_id));
        }

        let now = Utc::now();
        let created = Post {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            creator_id: post.creator_id,
            created_at: now,
            updated_at: now,
        };
        let seq = state.next_seq;
        state.next_seq += 1;
        state.posts.insert(
            created.id,
            StoredPost {
                post: created.clone(),
                seq,
            },
        );
        Ok(created)
    }

    async fn find_post_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.state.read().await.posts.get(&id).map(|s| s.post.clone()))
    }

    async fn find_post_with_creator(&self, id: Uuid) -> Result<Option<PostView>, StoreError> {
        let state = self.state.read().await;
        Ok(state.posts.get(&id).and_then(|s| state.view(&s.post)))
    }

    async fn find_posts_page(&self, page: u32, page_size: u32) -> Result<Vec<PostView>, StoreError> {
        let state = self.state.read().await;
        let mut posts: Vec<&StoredPost> = state.posts.values().collect();
        posts.sort_by(|a, b| {
            b.post
                .created_at
                .cmp(&a.post.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });

        let skip = usize::try_from(page_offset(page, page_size)).unwrap_or(usize::MAX);
        Ok(posts
            .into_iter()
            .skip(skip)
            .take(page_size as usize)
            .filter_map(|s| state.view(&s.post))
            .collect())
    }

    async fn count_posts(&self) -> Result<u64, StoreError> {
        Ok(self.state.read().await.posts.len() as u64)
    }

    async fn update_post(&self, id: Uuid, changes: PostChanges) -> Result<Option<UpdatedPost>, StoreError> {
        let mut state = self.state.write().await;
        let Some(stored) = state.posts.get_mut(&id) else {
            return Ok(None);
        };

        let previous_image_url = stored.post.image_url.clone();
        stored.post.title = changes.title;
        stored.post.content = changes.content;
        if let Some(image_url) = changes.image_url {
            stored.post.image_url = image_url;
        }
        stored.post.updated_at = Utc::now();

        Ok(Some(UpdatedPost {
            post: stored.post.clone(),
            previous_image_url,
        }))
    }

    async fn delete_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.state.write().await.posts.remove(&id).map(|s| s.post))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    async fn identity(store: &MemoryFeedStore, email: &str) -> Identity {
        store
            .create_identity(NewIdentity {
                email: email.to_string(),
                password_hash: "hash".to_string(),
                name: "Ada".to_string(),
            })
            .await
            .unwrap()
    }

    fn new_post(creator_id: Uuid, n: usize) -> NewPost {
        NewPost {
            title: format!("Post {}", n),
            content: "content".to_string(),
            image_url: format!("images/{}.png", n),
            creator_id,
        }
    }

    #[tokio::test]
    async fn test_identity_defaults() {
        let store = MemoryFeedStore::new();
        let created = identity(&store, "a@x.com").await;
        assert_eq!(created.status, DEFAULT_STATUS);
        assert!(created.post_ids.is_empty());

        let found = store.find_identity_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryFeedStore::new();
        identity(&store, "a@x.com").await;
        let result = store
            .create_identity(NewIdentity {
                email: "a@x.com".to_string(),
                password_hash: "other".to_string(),
                name: "Eve".to_string(),
            })
            .await;
        assert_matches!(result, Err(StoreError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_create_post_requires_existing_creator() {
        let store = MemoryFeedStore::new();
        let result = store.create_post(new_post(Uuid::new_v4(), 1)).await;
        assert_matches!(result, Err(StoreError::MissingIdentity(_)));
    }

    #[tokio::test]
    async fn test_pages_are_newest_first() {
        let store = MemoryFeedStore::new();
        let creator = identity(&store, "a@x.com").await;
        for n in 1..=5 {
            store.create_post(new_post(creator.id, n)).await.unwrap();
        }

        assert_eq!(store.count_posts().await.unwrap(), 5);

        let titles = |page: Vec<PostView>| page.into_iter().map(|p| p.title).collect::<Vec<_>>();
        assert_eq!(titles(store.find_posts_page(1, 2).await.unwrap()), vec!["Post 5", "Post 4"]);
        assert_eq!(titles(store.find_posts_page(2, 2).await.unwrap()), vec!["Post 3", "Post 2"]);
        assert_eq!(titles(store.find_posts_page(3, 2).await.unwrap()), vec!["Post 1"]);
        assert!(store.find_posts_page(4, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_post_reports_previous_image() {
        let store = MemoryFeedStore::new();
        let creator = identity(&store, "a@x.com").await;
        let post = store.create_post(new_post(creator.id, 1)).await.unwrap();

        let kept = store
            .update_post(
                post.id,
                PostChanges {
                    title: "New".to_string(),
                    content: "Body".to_string(),
                    image_url: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.post.image_url, "images/1.png");
        assert_eq!(kept.orphaned_image(), None);

        let replaced = store
            .update_post(
                post.id,
                PostChanges {
                    title: "New".to_string(),
                    content: "Body".to_string(),
                    image_url: Some("images/2.png".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.orphaned_image(), Some("images/1.png"));
        assert_eq!(replaced.post.creator_id, creator.id);
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let store = MemoryFeedStore::new();
        let result = store
            .update_post(
                Uuid::new_v4(),
                PostChanges {
                    title: "x".to_string(),
                    content: "y".to_string(),
                    image_url: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_owned_post_membership() {
        let store = MemoryFeedStore::new();
        let creator = identity(&store, "a@x.com").await;
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        assert!(store.push_owned_post(creator.id, first).await.unwrap());
        assert!(store.push_owned_post(creator.id, second).await.unwrap());
        assert!(store.pull_owned_post(creator.id, first).await.unwrap());

        let stored = store.find_identity_by_id(creator.id).await.unwrap().unwrap();
        assert_eq!(stored.post_ids, vec![second]);

        assert!(!store.push_owned_post(Uuid::new_v4(), first).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_post_returns_record_once() {
        let store = MemoryFeedStore::new();
        let creator = identity(&store, "a@x.com").await;
        let post = store.create_post(new_post(creator.id, 1)).await.unwrap();

        assert_eq!(store.delete_post(post.id).await.unwrap(), Some(post.clone()));
        assert_eq!(store.delete_post(post.id).await.unwrap(), None);
        assert_eq!(store.count_posts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_identity_persists_status() {
        let store = MemoryFeedStore::new();
        let mut created = identity(&store, "a@x.com").await;
        created.status = "Busy".to_string();
        assert!(store.update_identity(&created).await.unwrap());

        let stored = store.find_identity_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.status, "Busy");
    }
}
