//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod comments;
mod health;
mod pages;
mod posts;
mod profile;
mod views;

#[cfg(test)]
mod tests;

use actix_web::web;
use blogicum_core::pagination::PageRequest;
use serde::Deserialize;

use crate::middleware::error::AppError;

/// `?page=N` on listing routes. Anything unparsable means the first page.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    pub fn request(&self) -> PageRequest {
        match self.page.as_deref() {
            Some(raw) => PageRequest::parse(Some(raw)),
            None => PageRequest::first(),
        }
    }
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::index))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::detail))
                    .route("/{id}", web::put().to(posts::edit))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/comments", web::post().to(comments::add))
                    .route("/{id}/comments/{comment_id}", web::put().to(comments::edit))
                    .route(
                        "/{id}/comments/{comment_id}",
                        web::delete().to(comments::delete),
                    ),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::index))
                    .route("/{slug}", web::get().to(categories::posts)),
            )
            .service(
                web::scope("/profile")
                    .route("", web::put().to(profile::update))
                    .route("/{username}", web::get().to(profile::show)),
            )
            .service(
                web::scope("/pages")
                    .route("/about", web::get().to(pages::about))
                    .route("/rules", web::get().to(pages::rules)),
            ),
    );
}
