//! Application services - the flows handlers call into.
//!
//! Services hold their repositories behind trait objects and return typed
//! outcomes; mapping outcomes to responses is left to the caller.

mod accounts;
mod comments;
mod listing;
mod posts;

pub use accounts::AccountService;
pub use comments::CommentService;
pub use listing::{Listing, ListingContext, ListingService, Scope};
pub use posts::{PostDetail, PostService};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Category, Post};
use crate::error::DomainError;
use crate::ports::{CategoryRepository, PostRepository};
use crate::visibility;

/// Load a post and its category, failing with `NotFound` when the post is
/// missing or hidden from `viewer`.
pub(crate) async fn find_visible_post(
    posts: &dyn PostRepository,
    categories: &dyn CategoryRepository,
    id: Uuid,
    viewer: Option<Uuid>,
) -> Result<(Post, Option<Category>), DomainError> {
    let post = posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", id))?;

    let category = match post.category_id {
        Some(category_id) => categories.find_by_id(category_id).await?,
        None => None,
    };

    if !visibility::is_visible(&post, category.as_ref(), viewer, Utc::now()) {
        tracing::debug!(post_id = %id, "Post hidden from viewer");
        return Err(DomainError::not_found("Post", id));
    }

    Ok((post, category))
}
