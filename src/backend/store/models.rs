/**
 * Persistence Models
 *
 * Records as the feed store keeps them. `Identity` carries the password hash
 * and never leaves the backend; `Post` is converted to a `PostView` once its
 * creator is known.
 */
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::post::{CreatorSummary, PostView};

/// Status given to every identity at signup
pub const DEFAULT_STATUS: &str = "I am new!";

/// Identity struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Identity {
    /// Unique identity ID (UUID)
    pub id: Uuid,
    /// Email address (unique, stored lowercase)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Display name
    pub name: String,
    /// Free-text status, changed only by the identity itself
    pub status: String,
    /// Posts created by this identity, in creation order
    pub post_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    pub fn summary(&self) -> CreatorSummary {
        CreatorSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Fields needed to create an identity
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// Post struct representing a post in the database
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: String,
    /// Immutable after creation
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Attach the creator summary to produce the wire view
    pub fn into_view(self, creator: CreatorSummary) -> PostView {
        PostView {
            id: self.id,
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            creator,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Fields needed to create a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator_id: Uuid,
}

/// Mutable fields of a post
///
/// `image_url: None` keeps the stored image.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// Result of an atomic post update
#[derive(Debug, Clone)]
pub struct UpdatedPost {
    pub post: Post,
    /// Image the post referenced immediately before this update committed
    pub previous_image_url: String,
}

impl UpdatedPost {
    /// The image orphaned by this update, if the update replaced it
    pub fn orphaned_image(&self) -> Option<&str> {
        if self.previous_image_url != self.post.image_url {
            Some(&self.previous_image_url)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(image_url: &str) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            title: "T".to_string(),
            content: "C".to_string(),
            image_url: image_url.to_string(),
            creator_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_orphaned_image_only_when_replaced() {
        let kept = UpdatedPost {
            post: post("images/a.png"),
            previous_image_url: "images/a.png".to_string(),
        };
        assert_eq!(kept.orphaned_image(), None);

        let replaced = UpdatedPost {
            post: post("images/b.png"),
            previous_image_url: "images/a.png".to_string(),
        };
        assert_eq!(replaced.orphaned_image(), Some("images/a.png"));
    }

    #[test]
    fn test_into_view_keeps_fields() {
        let p = post("images/a.png");
        let creator = CreatorSummary {
            id: p.creator_id,
            name: "Ada".to_string(),
        };
        let id = p.id;
        let view = p.into_view(creator.clone());
        assert_eq!(view.id, id);
        assert_eq!(view.creator, creator);
        assert_eq!(view.image_url, "images/a.png");
    }
}
