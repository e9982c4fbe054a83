//! Comment handlers. Only the comment's author may change it.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogicum_core::forms::CommentForm;

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/{id}/comments
pub async fn add(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .add(path.into_inner(), identity.user_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(views::comment(
        &comment.comment,
        &comment.author_username,
    )))
}

/// PUT /api/posts/{id}/comments/{comment_id}
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = state
        .comments
        .edit(post_id, comment_id, identity.user_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(views::comment(
        &comment.comment,
        &comment.author_username,
    )))
}

/// DELETE /api/posts/{id}/comments/{comment_id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    state
        .comments
        .delete(post_id, comment_id, identity.user_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
