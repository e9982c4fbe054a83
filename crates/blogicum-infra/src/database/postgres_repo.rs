//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use blogicum_core::domain::{AuthoredComment, Category, PostSummary, User};
use blogicum_core::error::RepoError;
use blogicum_core::ports::{
    CategoryRepository, CommentRepository, PostFilter, PostRepository, UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username = %username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_published(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::IsPublished.eq(true))
            .order_by_asc(category::Column::Title)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// `SELECT post_id, COUNT(id)` row.
#[derive(Debug, FromQueryResult)]
struct CommentCount {
    post_id: Uuid,
    count: i64,
}

/// Base post query for a filter. The public branch left-joins categories so
/// uncategorized posts stay in the result.
pub(super) fn filtered_posts(filter: &PostFilter) -> Select<PostEntity> {
    let mut query = PostEntity::find();

    if let Some(author_id) = filter.author_id {
        query = query.filter(post::Column::AuthorId.eq(author_id));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(post::Column::CategoryId.eq(category_id));
    }
    if let Some(now) = filter.public_at {
        query = query
            .join(JoinType::LeftJoin, post::Relation::Category.def())
            .filter(post::Column::IsPublished.eq(true))
            .filter(post::Column::PubDate.lte(now))
            .filter(
                Condition::any()
                    .add(post::Column::CategoryId.is_null())
                    .add(category::Column::IsPublished.eq(true)),
            );
    }

    query
}

/// One listing page of [`filtered_posts`], newest `pub_date` first.
pub(super) fn page_of_posts(filter: &PostFilter, offset: u64, limit: u64) -> Select<PostEntity> {
    filtered_posts(filter)
        .order_by_desc(post::Column::PubDate)
        .order_by_asc(post::Column::CreatedAt)
        .order_by_asc(post::Column::Id)
        .offset(offset)
        .limit(limit)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        filtered_posts(filter)
            .count(&self.db)
            .await
            .map_err(query_error)
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<PostSummary>, RepoError> {
        let posts = page_of_posts(filter, offset, limit)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
        let category_ids: Vec<Uuid> = posts.iter().filter_map(|p| p.category_id).collect();

        let counts: HashMap<Uuid, i64> = CommentEntity::find()
            .select_only()
            .column(comment::Column::PostId)
            .column_as(comment::Column::Id.count(), "count")
            .filter(comment::Column::PostId.is_in(post_ids))
            .group_by(comment::Column::PostId)
            .into_model::<CommentCount>()
            .all(&self.db)
            .await
            .map_err(query_error)?
            .into_iter()
            .map(|row| (row.post_id, row.count))
            .collect();

        let authors: HashMap<Uuid, String> = UserEntity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(&self.db)
            .await
            .map_err(query_error)?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let categories: HashMap<Uuid, Category> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            CategoryEntity::find()
                .filter(category::Column::Id.is_in(category_ids))
                .all(&self.db)
                .await
                .map_err(query_error)?
                .into_iter()
                .map(|c| (c.id, c.into()))
                .collect()
        };

        Ok(posts
            .into_iter()
            .map(|model| PostSummary {
                author_username: authors.get(&model.author_id).cloned().unwrap_or_default(),
                category: model.category_id.and_then(|id| categories.get(&id).cloned()),
                comment_count: counts.get(&model.id).copied().unwrap_or(0) as u64,
                post: model.into(),
            })
            .collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<AuthoredComment>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .find_also_related(UserEntity)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| AuthoredComment {
                author_username: author.map(|u| u.username).unwrap_or_default(),
                comment: comment.into(),
            })
            .collect())
    }
}
