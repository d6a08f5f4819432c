/**
 * Post Wire Types
 *
 * These are the shapes of posts as they leave the server: in HTTP responses
 * and in realtime `posts` events. Field names are camelCase on the wire.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public summary of a post's creator, embedded in every post view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatorSummary {
    pub id: Uuid,
    pub name: String,
}

/// A post with its creator populated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Relative path of the attached image, always `/`-separated
    pub image_url: String,
    pub creator: CreatorSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of the public feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostsPage {
    pub posts: Vec<PostView>,
    /// Total number of posts, independent of the page window
    pub total_items: u64,
}

impl PostsPage {
    /// Number of pages needed to show `total_items` at `per_page` posts each
    pub fn page_count(&self, per_page: u32) -> u64 {
        if per_page == 0 {
            return 0;
        }
        self.total_items.div_ceil(u64::from(per_page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_view() -> PostView {
        let now = Utc::now();
        PostView {
            id: Uuid::new_v4(),
            title: "First".to_string(),
            content: "Hello".to_string(),
            image_url: "images/a.png".to_string(),
            creator: CreatorSummary {
                id: Uuid::new_v4(),
                name: "Ada".to_string(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_post_view_uses_camel_case() {
        let json = serde_json::to_value(sample_view()).unwrap();
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["creator"]["name"], "Ada");
    }

    #[test]
    fn test_page_count() {
        let page = PostsPage {
            posts: vec![],
            total_items: 5,
        };
        assert_eq!(page.page_count(2), 3);
        assert_eq!(page.page_count(5), 1);
        assert_eq!(page.page_count(0), 0);
    }

    #[test]
    fn test_posts_page_total_items_key() {
        let page = PostsPage {
            posts: vec![sample_view()],
            total_items: 1,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalItems"], 1);
        assert_eq!(json["posts"].as_array().map(Vec::len), Some(1));
    }
}
