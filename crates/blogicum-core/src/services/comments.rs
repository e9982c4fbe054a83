//! Comment flows.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{AuthoredComment, Comment};
use crate::error::DomainError;
use crate::forms::CommentForm;
use crate::ownership::assert_owner;
use crate::ports::{CategoryRepository, CommentRepository, PostRepository, UserRepository};

use super::find_visible_post;

#[derive(Clone)]
pub struct CommentService {
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
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

    /// Comment on a post the author is allowed to see.
    pub async fn add(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        form: CommentForm,
    ) -> Result<AuthoredComment, DomainError> {
        find_visible_post(
            self.posts.as_ref(),
            self.categories.as_ref(),
            post_id,
            Some(author_id),
        )
        .await?;

        let text = form.clean()?;
        let comment = self
            .comments
            .insert(Comment::new(post_id, author_id, text))
            .await?;
        tracing::info!(comment_id = %comment.id, post_id = %post_id, "Comment added");
        self.with_author(comment).await
    }

    pub async fn edit(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        actor: Uuid,
        form: CommentForm,
    ) -> Result<AuthoredComment, DomainError> {
        let mut comment = self.find_owned(post_id, comment_id, actor).await?;
        comment.text = form.clean()?;

        let comment = self.comments.update(comment).await?;
        tracing::info!(comment_id = %comment_id, "Comment updated");
        self.with_author(comment).await
    }

    pub async fn delete(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        actor: Uuid,
    ) -> Result<(), DomainError> {
        self.find_owned(post_id, comment_id, actor).await?;
        self.comments.delete(comment_id).await?;
        tracing::info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }

    /// Attach the author's current username.
    async fn with_author(&self, comment: Comment) -> Result<AuthoredComment, DomainError> {
        let author_username = self
            .users
            .find_by_id(comment.author_id)
            .await?
            .map(|u| u.username)
            .ok_or_else(|| DomainError::not_found("User", comment.author_id))?;

        Ok(AuthoredComment {
            comment,
            author_username,
        })
    }

    /// The comment must belong to `post_id`; a non-author gets `Forbidden`.
    async fn find_owned(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        actor: Uuid,
    ) -> Result<Comment, DomainError> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| DomainError::not_found("Comment", comment_id))?;

        assert_owner(&comment, actor).map_err(|e| {
            tracing::warn!(error = %e, "Comment change forbidden");
            DomainError::Forbidden
        })?;

        Ok(comment)
    }
}
