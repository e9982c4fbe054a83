//! Post listing, detail and author-only write handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::forms::PostForm;
use blogicum_core::services::Scope;

use super::{PageQuery, views};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts?page=N
pub async fn index(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let listing = state
        .listing
        .list(&Scope::All, viewer.user_id(), query.request())
        .await?;
    Ok(HttpResponse::Ok().json(views::posts_page(listing.posts)))
}

/// GET /api/posts/{id}
pub async fn detail(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = state.posts.detail(path.into_inner(), viewer.user_id()).await?;
    Ok(HttpResponse::Ok().json(views::post_detail(detail)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(identity.user_id, body.into_inner()).await?;
    let detail = state.posts.detail(post.id, Some(identity.user_id)).await?;
    Ok(HttpResponse::Created().json(views::post_detail(detail)))
}

/// PUT /api/posts/{id}
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state
        .posts
        .edit(id, identity.user_id, body.into_inner())
        .await?;
    let detail = state.posts.detail(id, Some(identity.user_id)).await?;
    Ok(HttpResponse::Ok().json(views::post_detail(detail)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(path.into_inner(), identity.user_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
