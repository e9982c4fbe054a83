//! Who may see a post.
//!
//! A post is publicly visible when it is published, its `pub_date` has passed
//! and its category (if any) is published. Its author sees it in every state.
//! Callers turn a negative answer into [`DomainError::NotFound`] so hidden
//! posts look exactly like missing ones.
//!
//! [`DomainError::NotFound`]: crate::DomainError::NotFound

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Post};

/// Public branch of the policy.
///
/// `category` is the post's resolved category. A dangling `category_id` is
/// passed as `None` and counts as "no category".
pub fn is_publicly_visible(post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
    post.is_published && post.pub_date <= now && category.is_none_or(|c| c.is_published)
}

/// Whether `viewer` (anonymous when `None`) may open `post`.
pub fn is_visible(
    post: &Post,
    category: Option<&Category>,
    viewer: Option<Uuid>,
    now: DateTime<Utc>,
) -> bool {
    viewer == Some(post.author_id) || is_publicly_visible(post, category, now)
}
