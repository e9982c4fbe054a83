//! Post detail and the author-only write flows.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{AuthoredComment, Category, Post};
use crate::error::DomainError;
use crate::forms::PostForm;
use crate::ownership::assert_owner;
use crate::ports::{CategoryRepository, CommentRepository, PostRepository, UserRepository};

use super::find_visible_post;

/// Everything a post page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub post: Post,
    pub author_username: String,
    pub category: Option<Category>,
    pub comments: Vec<AuthoredComment>,
}

#[derive(Clone)]
pub struct PostService {
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl PostService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            users,
            categories,
            posts,
            comments,
        }
    }

    /// A single post as seen by `viewer`. Hidden posts are `NotFound`.
    pub async fn detail(&self, id: Uuid, viewer: Option<Uuid>) -> Result<PostDetail, DomainError> {
        let (post, category) =
            find_visible_post(self.posts.as_ref(), self.categories.as_ref(), id, viewer).await?;

        let author_username = self
            .users
            .find_by_id(post.author_id)
            .await?
            .map(|u| u.username)
            .ok_or_else(|| DomainError::Internal(format!("post {id} has no author")))?;
        let comments = self.comments.find_by_post(id).await?;

        Ok(PostDetail {
            post,
            author_username,
            category,
            comments,
        })
    }

    pub async fn create(&self, author_id: Uuid, form: PostForm) -> Result<Post, DomainError> {
        let clean = form.clean()?;
        let category = self.resolve_category(clean.category_slug.as_deref()).await?;

        let mut post = Post::new(
            author_id,
            clean.title,
            clean.text,
            clean.pub_date.unwrap_or_else(Utc::now),
        );
        post.category_id = category.map(|c| c.id);
        post.image = clean.image;
        post.is_published = clean.is_published.unwrap_or(true);

        let post = self.posts.insert(post).await?;
        tracing::info!(post_id = %post.id, author_id = %author_id, "Post created");
        Ok(post)
    }

    /// Replace a post's fields. Missing `pub_date` and image keep their
    /// current values; a missing category clears it.
    pub async fn edit(&self, id: Uuid, actor: Uuid, form: PostForm) -> Result<Post, DomainError> {
        let mut post = self.find_owned(id, actor).await?;

        let clean = form.clean()?;
        let category = self.resolve_category(clean.category_slug.as_deref()).await?;

        post.title = clean.title;
        post.text = clean.text;
        if let Some(pub_date) = clean.pub_date {
            post.pub_date = pub_date;
        }
        if let Some(is_published) = clean.is_published {
            post.is_published = is_published;
        }
        if clean.image.is_some() {
            post.image = clean.image;
        }
        post.category_id = category.map(|c| c.id);
        post.updated_at = Utc::now();

        let post = self.posts.update(post).await?;
        tracing::info!(post_id = %id, "Post updated");
        Ok(post)
    }

    /// Delete a post together with its comments.
    pub async fn delete(&self, id: Uuid, actor: Uuid) -> Result<(), DomainError> {
        self.find_owned(id, actor).await?;
        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// Categories a post can be filed under.
    pub async fn published_categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.find_published().await?)
    }

    /// Ownership failures on posts are silent: the caller sends the user back
    /// to the post instead of showing an error.
    async fn find_owned(&self, id: Uuid, actor: Uuid) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))?;

        assert_owner(&post, actor).map_err(|e| {
            tracing::debug!(error = %e, "Post change denied");
            DomainError::SilentDenial { post_id: id }
        })?;

        Ok(post)
    }

    async fn resolve_category(&self, slug: Option<&str>) -> Result<Option<Category>, DomainError> {
        let Some(slug) = slug else {
            return Ok(None);
        };

        match self.categories.find_by_slug(slug).await? {
            Some(category) if category.is_published => Ok(Some(category)),
            _ => Err(DomainError::Validation(vec![format!(
                "category: unknown category '{slug}'"
            )])),
        }
    }
}
