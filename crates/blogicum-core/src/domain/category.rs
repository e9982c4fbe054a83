use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category entity - a published or hidden grouping of posts, addressed by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(title: String, slug: String, is_published: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: String::new(),
            slug,
            is_published,
            created_at: Utc::now(),
        }
    }
}
