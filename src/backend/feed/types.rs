/**
 * Feed Handler Types
 *
 * Request and response bodies for the `/feed` endpoints, and the multipart
 * form shared by create and update.
 */
use axum::extract::Multipart;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::attachments::UploadedImage;
use crate::backend::error::BackendError;
use crate::shared::{CreatorSummary, PostView};

/// Title, content and image of a post as submitted by a client
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    /// Newly uploaded image of an accepted type
    pub image: Option<UploadedImage>,
    /// Reference to the image the client already has, sent as a text field
    pub existing_image: Option<String>,
}

impl PostForm {
    /// Read a `multipart/form-data` body
    ///
    /// Files with a content type other than png or jpeg are dropped, so the
    /// form behaves as if no image was sent.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, BackendError> {
        let mut form = PostForm::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::warn!("[Feed] Failed to read multipart field: {}", e);
            BackendError::invalid_input("Malformed multipart body.")
        })? {
            let name = field.name().unwrap_or("").to_string();
            let file_name = field.file_name().map(|s| s.to_string());
            let content_type = field.content_type().map(|s| s.to_string());

            match (name.as_str(), file_name) {
                ("image", Some(file_name)) => {
                    let bytes = field.bytes().await.map_err(|e| {
                        tracing::warn!("[Feed] Failed to read image data: {}", e);
                        BackendError::invalid_input("Malformed multipart body.")
                    })?;
                    let upload = UploadedImage {
                        file_name,
                        content_type: content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
                        bytes,
                    };
                    if upload.is_accepted_type() {
                        form.image = Some(upload);
                    } else {
                        tracing::debug!("[Feed] Ignoring upload of type {}", upload.content_type);
                    }
                }
                (field_name, None) => {
                    let value = field.text().await.map_err(|e| {
                        tracing::warn!("[Feed] Failed to read field {}: {}", field_name, e);
                        BackendError::invalid_input("Malformed multipart body.")
                    })?;
                    match field_name {
                        "title" => form.title = value,
                        "content" => form.content = value,
                        "image" => form.existing_image = Some(value),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// The kept image reference, if it is non-empty
    pub fn existing_image_ref(&self) -> Option<&str> {
        self.existing_image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Query of `GET /feed/posts`
#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    /// 1-based page index, defaults to 1
    pub page: Option<u32>,
}

/// Body of `GET /feed/posts`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsResponse {
    pub message: String,
    pub posts: Vec<PostView>,
    pub total_items: u64,
}

/// Body of `POST /feed/post`
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub message: String,
    pub post: PostView,
    pub creator: CreatorSummary,
}

/// Body of `GET` and `PUT /feed/post/{postId}`
#[derive(Debug, Serialize, Deserialize)]
pub struct PostResponse {
    pub message: String,
    pub post: PostView,
}

/// Body of `DELETE /feed/post/{postId}`
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub message: String,
    #[serde(rename = "postId")]
    pub post_id: Uuid,
}
