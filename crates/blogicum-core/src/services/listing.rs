//! Paginated post listings for the index, category and profile pages.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Category, PostSummary, User};
use crate::error::DomainError;
use crate::pagination::{PAGE_SIZE, Page, PageRequest, PageWindow};
use crate::ports::{CategoryRepository, PostFilter, PostRepository, UserRepository};

/// What a listing is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every publicly visible post.
    All,
    /// Publicly visible posts of a published category, by slug.
    Category(String),
    /// Every post of one author, by username.
    Author(String),
}

/// The entity a listing was scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingContext {
    All,
    Category(Category),
    Profile {
        user: User,
        /// The viewer is the profile owner and may be offered edit/delete.
        is_owner: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub context: ListingContext,
    pub posts: Page<PostSummary>,
}

/// Builds listings. The author exception of the visibility policy never applies
/// here: public scopes show public posts only, and the profile scope shows
/// everything unfiltered.
#[derive(Clone)]
pub struct ListingService {
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
}

impl ListingService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
        posts: Arc<dyn PostRepository>,
    ) -> Self {
        Self {
            users,
            categories,
            posts,
        }
    }

    pub async fn list(
        &self,
        scope: &Scope,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Listing, DomainError> {
        let (context, filter) = match scope {
            Scope::All => (
                ListingContext::All,
                PostFilter {
                    public_at: Some(Utc::now()),
                    ..Default::default()
                },
            ),
            Scope::Category(slug) => {
                let category = self
                    .categories
                    .find_by_slug(slug)
                    .await?
                    .filter(|c| c.is_published)
                    .ok_or_else(|| DomainError::not_found("Category", slug))?;
                let filter = PostFilter {
                    category_id: Some(category.id),
                    public_at: Some(Utc::now()),
                    ..Default::default()
                };
                (ListingContext::Category(category), filter)
            }
            Scope::Author(username) => {
                let user = self
                    .users
                    .find_by_username(username)
                    .await?
                    .ok_or_else(|| DomainError::not_found("User", username))?;
                let filter = PostFilter {
                    author_id: Some(user.id),
                    ..Default::default()
                };
                let is_owner = viewer == Some(user.id);
                (ListingContext::Profile { user, is_owner }, filter)
            }
        };

        let posts = self.paginate(&filter, page).await?;
        tracing::debug!(
            scope = ?scope,
            page = posts.number,
            count = posts.count,
            "Listing built"
        );

        Ok(Listing { context, posts })
    }

    async fn paginate(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<PostSummary>, DomainError> {
        let count = self.posts.count(filter).await?;
        let window = PageWindow::new(page, count, PAGE_SIZE);
        let items = self
            .posts
            .find_page(filter, window.offset(), PAGE_SIZE)
            .await?;
        Ok(window.into_page(items))
    }
}
