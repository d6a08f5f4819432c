/**
 * Feed Handlers
 *
 * HTTP handlers for the `/feed` endpoints. Each one unpacks the request,
 * delegates to `FeedService` and shapes the JSON reply.
 *
 * # Endpoints
 *
 * - `GET /feed/posts?page=N` - public, one page of posts
 * - `POST /feed/post` - create (multipart: title, content, image)
 * - `GET /feed/post/{postId}` - single post
 * - `PUT /feed/post/{postId}` - update (multipart; `image` as file or kept reference)
 * - `DELETE /feed/post/{postId}` - delete
 */
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::backend::error::BackendResult;
use crate::backend::feed::service::FeedService;
use crate::backend::feed::types::{
    CreatePostResponse, DeletedResponse, PostForm, PostResponse, PostsQuery, PostsResponse,
};
use crate::backend::middleware::AuthUser;

/// List posts (GET /feed/posts)
///
/// # Example Response
///
/// ```json
/// {
///   "message": "Fetched posts successfully.",
///   "posts": [{"id": "...", "title": "...", "imageUrl": "images/...", "creator": {"id": "...", "name": "Max"}}],
///   "totalItems": 5
/// }
/// ```
pub async fn get_posts(
    State(feed): State<Arc<FeedService>>,
    Query(query): Query<PostsQuery>,
) -> BackendResult<Json<PostsResponse>> {
    let page = feed.get_posts(query.page.unwrap_or(1)).await?;

    Ok(Json(PostsResponse {
        message: "Fetched posts successfully.".to_string(),
        posts: page.posts,
        total_items: page.total_items,
    }))
}

/// Create a post (POST /feed/post)
pub async fn create_post(
    State(feed): State<Arc<FeedService>>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> BackendResult<(StatusCode, Json<CreatePostResponse>)> {
    let form = PostForm::from_multipart(multipart).await?;
    let post = feed.create_post(user.identity_id, form).await?;
    let creator = post.creator.clone();

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            message: "Post created successfully!".to_string(),
            post,
            creator,
        }),
    ))
}

/// Fetch a single post (GET /feed/post/{postId})
pub async fn get_post(
    State(feed): State<Arc<FeedService>>,
    Path(post_id): Path<Uuid>,
) -> BackendResult<Json<PostResponse>> {
    let post = feed.get_post(post_id).await?;

    Ok(Json(PostResponse {
        message: "Post fetched.".to_string(),
        post,
    }))
}

/// Update a post (PUT /feed/post/{postId})
pub async fn update_post(
    State(feed): State<Arc<FeedService>>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
    multipart: Multipart,
) -> BackendResult<Json<PostResponse>> {
    let form = PostForm::from_multipart(multipart).await?;
    let post = feed.update_post(user.identity_id, post_id, form).await?;

    Ok(Json(PostResponse {
        message: "Post updated!".to_string(),
        post,
    }))
}

/// Delete a post (DELETE /feed/post/{postId})
pub async fn delete_post(
    State(feed): State<Arc<FeedService>>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
) -> BackendResult<Json<DeletedResponse>> {
    feed.delete_post(user.identity_id, post_id).await?;

    Ok(Json(DeletedResponse {
        message: "Deleted post.".to_string(),
        post_id,
    }))
}
