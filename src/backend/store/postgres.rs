/**
 * PostgreSQL Feed Store
 *
 * sqlx implementation of `FeedStore`. The schema lives in `migrations/`.
 * Owned-post membership is a `UUID[]` column updated with `array_append` /
 * `array_remove`, so each change is a single-row atomic statement. Post
 * updates lock the row and return the image it held before the write.
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::store::models::{
    Identity, NewIdentity, NewPost, Post, PostChanges, UpdatedPost, DEFAULT_STATUS,
};
use crate::backend::store::{page_offset, FeedStore, StoreError};
use crate::shared::post::{CreatorSummary, PostView};

const IDENTITY_COLUMNS: &str =
    "id, email, password_hash, name, status, post_ids, created_at, updated_at";

const POST_COLUMNS: &str = "id, title, content, image_url, creator_id, created_at, updated_at";

/// Post joined with its creator's name
#[derive(sqlx::FromRow)]
struct PostWithCreatorRow {
    id: Uuid,
    title: String,
    content: String,
    image_url: String,
    creator_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    creator_name: String,
}

impl From<PostWithCreatorRow> for PostView {
    fn from(row: PostWithCreatorRow) -> Self {
        PostView {
            id: row.id,
            title: row.title,
            content: row.content,
            image_url: row.image_url,
            creator: CreatorSummary {
                id: row.creator_id,
                name: row.creator_name,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UpdatedPostRow {
    #[sqlx(flatten)]
    post: Post,
    previous_image_url: String,
}

/// Feed store backed by PostgreSQL
#[derive(Clone)]
pub struct PgFeedStore {
    pool: PgPool,
}

impl PgFeedStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn map_identity_insert_error(err: sqlx::Error, email: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateEmail(email.to_string());
        }
    }
    StoreError::Database(err)
}

fn map_post_insert_error(err: sqlx::Error, creator_id: Uuid) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return StoreError::MissingIdentity(creator_id);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl FeedStore for PgFeedStore {
    async fn create_identity(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO users (id, email, password_hash, name, status, post_ids, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, '{{}}', $6, $6) \
             RETURNING {}",
            IDENTITY_COLUMNS
        );

        sqlx::query_as::<_, Identity>(&query)
            .bind(Uuid::new_v4())
            .bind(&identity.email)
            .bind(&identity.password_hash)
            .bind(&identity.name)
            .bind(DEFAULT_STATUS)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_identity_insert_error(e, &identity.email))
    }

    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", IDENTITY_COLUMNS);
        let identity = sqlx::query_as::<_, Identity>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(identity)
    }

    async fn find_identity_by_id(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", IDENTITY_COLUMNS);
        let identity = sqlx::query_as::<_, Identity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(identity)
    }

    async fn update_identity(&self, identity: &Identity) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, status = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(identity.id)
        .bind(&identity.name)
        .bind(&identity.status)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn push_owned_post(&self, identity_id: Uuid, post_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET post_ids = array_append(post_ids, $2), updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(identity_id)
        .bind(post_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn pull_owned_post(&self, identity_id: Uuid, post_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET post_ids = array_remove(post_ids, $2), updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(identity_id)
        .bind(post_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO posts (id, title, content, image_url, creator_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING {}",
            POST_COLUMNS
        );

        sqlx::query_as::<_, Post>(&query)
            .bind(Uuid::new_v4())
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.image_url)
            .bind(post.creator_id)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_post_insert_error(e, post.creator_id))
    }

    async fn find_post_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let query = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn find_post_with_creator(&self, id: Uuid) -> Result<Option<PostView>, StoreError> {
        let row = sqlx::query_as::<_, PostWithCreatorRow>(
            r#"
            SELECT p.id, p.title, p.content, p.image_url, p.creator_id, p.created_at, p.updated_at,
                   u.name AS creator_name
            FROM posts p
            JOIN users u ON u.id = p.creator_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(PostView::from))
    }

    async fn find_posts_page(&self, page: u32, page_size: u32) -> Result<Vec<PostView>, StoreError> {
        let offset = i64::try_from(page_offset(page, page_size)).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, PostWithCreatorRow>(
            r#"
            SELECT p.id, p.title, p.content, p.image_url, p.creator_id, p.created_at, p.updated_at,
                   u.name AS creator_name
            FROM posts p
            JOIN users u ON u.id = p.creator_id
            ORDER BY p.created_at DESC, p.seq DESC
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(i64::from(page_size))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(PostView::from).collect())
    }

    async fn count_posts(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn update_post(&self, id: Uuid, changes: PostChanges) -> Result<Option<UpdatedPost>, StoreError> {
        // The locking subselect makes a concurrent update wait and then see this
        // write's image as its previous one.
        let row = sqlx::query_as::<_, UpdatedPostRow>(
            r#"
            UPDATE posts p
            SET title = $2,
                content = $3,
                image_url = COALESCE($4, old.image_url),
                updated_at = $5
            FROM (SELECT id, image_url FROM posts WHERE id = $1 FOR UPDATE) AS old
            WHERE p.id = old.id
            RETURNING p.id, p.title, p.content, p.image_url, p.creator_id, p.created_at, p.updated_at,
                      old.image_url AS previous_image_url
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(changes.image_url.as_deref())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| UpdatedPost {
            post: row.post,
            previous_image_url: row.previous_image_url,
        }))
    }

    async fn delete_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let query = format!("DELETE FROM posts WHERE id = $1 RETURNING {}", POST_COLUMNS);
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }
}
