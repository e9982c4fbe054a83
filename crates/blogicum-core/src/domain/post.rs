use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;

/// Post entity - a blog entry written by a single author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    /// Moment from which the post may be shown publicly.
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    /// Lookup-only reference; the category lives independently of its posts.
    pub category_id: Option<Uuid>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new published post with no category or image.
    pub fn new(author_id: Uuid, title: String, text: String, pub_date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            text,
            pub_date,
            is_published: true,
            category_id: None,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A post as it appears in listings: joined with its author and category and
/// annotated with the number of comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub post: Post,
    pub author_username: String,
    pub category: Option<Category>,
    pub comment_count: u64,
}
