/**
 * Feed Service
 *
 * Orchestrates every feed mutation: validation, ownership checks,
 * persistence, the attachment file lifecycle and realtime notification.
 *
 * # Ordering
 *
 * Files are saved before the store write that references them and released
 * only after the store write that dropped the last reference has committed.
 * When a write fails after its upload was saved, the upload is released so
 * nothing is left orphaned. Realtime publishing happens last and its
 * failures are logged, never returned.
 */
use std::sync::Arc;

use uuid::Uuid;

use crate::backend::attachments::AttachmentStore;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::realtime::EventPublisher;
use crate::backend::store::{FeedStore, NewPost, Post, PostChanges};
use crate::backend::feed::types::PostForm;
use crate::shared::validation::{validate_post_fields, validate_status};
use crate::shared::{PostEvent, PostView, PostsPage, POSTS_TOPIC};

/// Posts returned per page of `GET /feed/posts`
pub const POSTS_PER_PAGE: u32 = 2;

const POST_NOT_FOUND: &str = "Could not find post.";
const USER_NOT_FOUND: &str = "User not found.";
const NOT_AUTHORIZED: &str = "Not authorized!";

pub struct FeedService {
    store: Arc<dyn FeedStore>,
    attachments: Arc<dyn AttachmentStore>,
    publisher: Arc<dyn EventPublisher>,
    page_size: u32,
}

impl FeedService {
    pub fn new(
        store: Arc<dyn FeedStore>,
        attachments: Arc<dyn AttachmentStore>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            attachments,
            publisher,
            page_size: POSTS_PER_PAGE,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Create a post owned by `identity_id`
    pub async fn create_post(&self, identity_id: Uuid, form: PostForm) -> BackendResult<PostView> {
        validate_post_fields(&form.title, &form.content).map_err(BackendError::validation)?;
        let image = form
            .image
            .ok_or_else(|| BackendError::invalid_input("No image provided."))?;

        let creator = self
            .store
            .find_identity_by_id(identity_id)
            .await?
            .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;

        let image_url = self.attachments.save(image).await?;

        let post = match self
            .store
            .create_post(NewPost {
                title: form.title,
                content: form.content,
                image_url: image_url.clone(),
                creator_id: creator.id,
            })
            .await
        {
            Ok(post) => post,
            Err(e) => {
                self.attachments.release(&image_url);
                return Err(e.into());
            }
        };

        match self.store.push_owned_post(creator.id, post.id).await {
            Ok(true) => {}
            Ok(false) => {
                self.discard_post(&post).await;
                return Err(BackendError::not_found(USER_NOT_FOUND));
            }
            Err(e) => {
                self.discard_post(&post).await;
                return Err(e.into());
            }
        }

        let view = post.into_view(creator.summary());
        tracing::info!("[Feed] Post {} created by {}", view.id, identity_id);
        self.publish(PostEvent::Create { post: view.clone() });
        Ok(view)
    }

    /// Replace the title, content and optionally the image of a post
    ///
    /// Without a new upload the form must carry a reference to the current
    /// image; the stored image is then kept as is.
    pub async fn update_post(&self, identity_id: Uuid, post_id: Uuid, form: PostForm) -> BackendResult<PostView> {
        validate_post_fields(&form.title, &form.content).map_err(BackendError::validation)?;
        if form.image.is_none() && form.existing_image_ref().is_none() {
            return Err(BackendError::invalid_input("No file picked."));
        }

        let current = self
            .store
            .find_post_with_creator(post_id)
            .await?
            .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND))?;
        if current.creator.id != identity_id {
            tracing::warn!("[Feed] {} tried to edit post {} owned by {}", identity_id, post_id, current.creator.id);
            return Err(BackendError::forbidden(NOT_AUTHORIZED));
        }

        let new_image = match form.image {
            Some(upload) => Some(self.attachments.save(upload).await?),
            None => None,
        };

        let changes = PostChanges {
            title: form.title,
            content: form.content,
            image_url: new_image.clone(),
        };
        let updated = match self.store.update_post(post_id, changes).await {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                self.release_upload(new_image.as_deref());
                return Err(BackendError::not_found(POST_NOT_FOUND));
            }
            Err(e) => {
                self.release_upload(new_image.as_deref());
                return Err(e.into());
            }
        };

        // Committed: the image this write displaced is now unreferenced.
        self.attachments
            .replace(&updated.previous_image_url, &updated.post.image_url);

        let view = updated.post.into_view(current.creator);
        tracing::info!("[Feed] Post {} updated", post_id);
        self.publish(PostEvent::Update { post: view.clone() });
        Ok(view)
    }

    /// Delete a post owned by `identity_id` and release its image
    pub async fn delete_post(&self, identity_id: Uuid, post_id: Uuid) -> BackendResult<()> {
        let post = self
            .store
            .find_post_by_id(post_id)
            .await?
            .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND))?;
        if post.creator_id != identity_id {
            tracing::warn!("[Feed] {} tried to delete post {} owned by {}", identity_id, post_id, post.creator_id);
            return Err(BackendError::forbidden(NOT_AUTHORIZED));
        }

        let removed = self
            .store
            .delete_post(post_id)
            .await?
            .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND))?;

        let pulled = self.store.pull_owned_post(identity_id, post_id).await;
        self.attachments.release(&removed.image_url);

        match pulled {
            Ok(true) => {}
            Ok(false) => tracing::warn!("[Feed] Owner {} vanished while deleting post {}", identity_id, post_id),
            Err(e) => return Err(e.into()),
        }

        tracing::info!("[Feed] Post {} deleted", post_id);
        self.publish(PostEvent::Delete { post: post_id });
        Ok(())
    }

    /// One page of posts, newest first, with the total count
    pub async fn get_posts(&self, page: u32) -> BackendResult<PostsPage> {
        if page == 0 {
            return Err(BackendError::invalid_input("Page must be 1 or greater."));
        }

        let total_items = self.store.count_posts().await?;
        let posts = self.store.find_posts_page(page, self.page_size).await?;
        tracing::debug!("[Feed] Page {} has {} of {} posts", page, posts.len(), total_items);

        Ok(PostsPage { posts, total_items })
    }

    pub async fn get_post(&self, post_id: Uuid) -> BackendResult<PostView> {
        self.store
            .find_post_with_creator(post_id)
            .await?
            .ok_or_else(|| BackendError::not_found(POST_NOT_FOUND))
    }

    pub async fn get_status(&self, identity_id: Uuid) -> BackendResult<String> {
        let identity = self
            .store
            .find_identity_by_id(identity_id)
            .await?
            .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;
        Ok(identity.status)
    }

    pub async fn update_status(&self, identity_id: Uuid, status: &str) -> BackendResult<()> {
        validate_status(status).map_err(BackendError::validation)?;

        let mut identity = self
            .store
            .find_identity_by_id(identity_id)
            .await?
            .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;
        identity.status = status.trim().to_string();

        if !self.store.update_identity(&identity).await? {
            return Err(BackendError::not_found(USER_NOT_FOUND));
        }
        Ok(())
    }

    /// Undo a post whose owner could not be updated
    async fn discard_post(&self, post: &Post) {
        if let Err(e) = self.store.delete_post(post.id).await {
            tracing::error!("[Feed] Failed to roll back post {}: {}", post.id, e);
            return;
        }
        self.attachments.release(&post.image_url);
    }

    fn release_upload(&self, path: Option<&str>) {
        if let Some(path) = path {
            self.attachments.release(path);
        }
    }

    fn publish(&self, event: PostEvent) {
        let action = event.action();
        let payload = match event.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("[Feed] Failed to encode {} event: {}", action, e);
                return;
            }
        };
        if let Err(e) = self.publisher.publish(POSTS_TOPIC, payload) {
            tracing::warn!("[Feed] Failed to publish {} event: {}", action, e);
        }
    }
}
