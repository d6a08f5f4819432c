//! Feed Store Module
//!
//! Persistence contract for identities and posts, plus its two
//! implementations.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs       - FeedStore trait and StoreError
//! ├── models.rs    - Identity / Post records
//! ├── memory.rs    - In-memory store (no DATABASE_URL, tests)
//! └── postgres.rs  - PostgreSQL store via sqlx
//! ```
//!
//! # Atomicity
//!
//! Implementations must make `push_owned_post`, `pull_owned_post` and
//! `update_post` single-record atomic operations. Concurrent `create_post` /
//! `delete_post` calls for the same identity rely on this instead of a lock
//! in the feed service, and `update_post` must report the image that was
//! stored immediately before its own write so exactly one caller releases
//! each orphaned file.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::post::PostView;

/// Persistence models
pub mod models;

/// In-memory implementation
pub mod memory;

/// PostgreSQL implementation
pub mod postgres;

pub use memory::MemoryFeedStore;
pub use models::{Identity, NewIdentity, NewPost, Post, PostChanges, UpdatedPost, DEFAULT_STATUS};
pub use postgres::PgFeedStore;

/// Errors raised by a feed store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another identity already uses this email
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// A post referenced an identity that does not exist
    #[error("identity {0} does not exist")]
    MissingIdentity(Uuid),

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Abstract persistence for the feed
#[async_trait]
pub trait FeedStore: Send + Sync {
    async fn create_identity(&self, identity: NewIdentity) -> Result<Identity, StoreError>;
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;
    async fn find_identity_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError>;
    /// Persist `name` and `status`; returns `false` if the identity is gone
    async fn update_identity(&self, identity: &Identity) -> Result<bool, StoreError>;
    /// Append a post to the identity's owned list; returns `false` if the identity is gone
    async fn push_owned_post(&self, identity_id: Uuid, post_id: Uuid) -> Result<bool, StoreError>;
    /// Remove a post from the identity's owned list; returns `false` if the identity is gone
    async fn pull_owned_post(&self, identity_id: Uuid, post_id: Uuid) -> Result<bool, StoreError>;

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError>;
    async fn find_post_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError>;
    async fn find_post_with_creator(&self, id: Uuid) -> Result<Option<PostView>, StoreError>;
    /// Newest-first window of `page_size` posts starting at `(page - 1) * page_size`
    async fn find_posts_page(&self, page: u32, page_size: u32) -> Result<Vec<PostView>, StoreError>;
    async fn count_posts(&self) -> Result<u64, StoreError>;
    async fn update_post(&self, id: Uuid, changes: PostChanges) -> Result<Option<UpdatedPost>, StoreError>;
    async fn delete_post(&self, id: Uuid) -> Result<Option<Post>, StoreError>;
}

/// Number of records to skip for a 1-based page index
pub fn page_offset(page: u32, page_size: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(page_size)
}
