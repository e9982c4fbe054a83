//! Category handlers.

use actix_web::{HttpResponse, web};

use blogicum_core::services::{ListingContext, Scope};
use blogicum_shared::ApiResponse;
use blogicum_shared::dto::CategoryPostsResponse;

use super::{PageQuery, views};
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/categories
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.posts.published_categories().await?;
    let body: Vec<_> = categories.iter().map(views::category).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /api/categories/{slug}?page=N
pub async fn posts(
    state: web::Data<AppState>,
    viewer: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let listing = state
        .listing
        .list(
            &Scope::Category(path.into_inner()),
            viewer.user_id(),
            query.request(),
        )
        .await?;

    let ListingContext::Category(category) = &listing.context else {
        return Err(AppError::Internal(
            "category listing without a category".to_string(),
        ));
    };

    Ok(HttpResponse::Ok().json(CategoryPostsResponse {
        category: views::category(category),
        posts: views::posts_page(listing.posts),
    }))
}
