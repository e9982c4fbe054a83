//! Profile handlers.

use actix_web::{HttpResponse, web};

use blogicum_core::forms::ProfileForm;
use blogicum_core::services::{ListingContext, Scope};
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::ProfileResponse;

use super::{PageQuery, views};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/profile/{username}?page=N
///
/// Lists every post of the user, hidden ones included.
pub async fn show(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let listing = state
        .listing
        .list(
            &Scope::Author(path.into_inner()),
            viewer.user_id(),
            query.request(),
        )
        .await?;

    let ListingContext::Profile { user, is_owner } = &listing.context else {
        return Err(AppError::Internal(
            "profile listing without a profile".to_string(),
        ));
    };

    Ok(HttpResponse::Ok().json(ProfileResponse {
        profile: views::user(user),
        is_owner: *is_owner,
        posts: views::posts_page(listing.posts),
    }))
}

/// PUT /api/profile
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ProfileForm>,
) -> AppResult<HttpResponse> {
    let user = state
        .accounts
        .update_profile(identity.user_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        views::user(&user),
        "Profile updated",
    )))
}
