use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{TimeDelta, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use blogicum_core::domain::{Comment, Post, User};
use blogicum_core::ports::{BaseRepository, TokenService};
use blogicum_infra::{Argon2PasswordService, InMemoryStore, JwtConfig, JwtTokenService};

use super::configure_routes;
use crate::state::AppState;

struct Fixture {
    store: Arc<InMemoryStore>,
    tokens: Arc<dyn TokenService>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
            tokens: Arc::new(JwtTokenService::new(JwtConfig::default())),
        }
    }

    fn state(&self) -> web::Data<AppState> {
        web::Data::new(AppState::in_memory(
            self.store.clone(),
            Arc::new(Argon2PasswordService::new()),
        ))
    }

    async fn user(&self, username: &str) -> (User, String) {
        let user = User::new(username.to_string(), String::new(), "unused".to_string());
        let user = BaseRepository::<User, Uuid>::insert(self.store.as_ref(), user)
            .await
            .unwrap();
        let token = self
            .tokens
            .generate_token(user.id, &user.username, vec!["user".to_string()])
            .unwrap();
        (user, format!("Bearer {token}"))
    }

    async fn post(&self, author: &User, is_published: bool) -> Post {
        let mut post = Post::new(
            author.id,
            "Title".to_string(),
            "Body".to_string(),
            Utc::now() - TimeDelta::hours(1),
        );
        post.is_published = is_published;
        BaseRepository::<Post, Uuid>::insert(self.store.as_ref(), post)
            .await
            .unwrap()
    }

    async fn comment(&self, post: &Post, author: &User) -> Comment {
        let comment = Comment::new(post.id, author.id, "First!".to_string());
        BaseRepository::<Comment, Uuid>::insert(self.store.as_ref(), comment)
            .await
            .unwrap()
    }
}

macro_rules! app {
    ($fixture:expr) => {
        test::init_service(
            App::new()
                .app_data($fixture.state())
                .app_data(web::Data::new($fixture.tokens.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_hidden_post_is_not_found_for_others() {
    let fixture = Fixture::new();
    let (author, author_token) = fixture.user("author").await;
    let (_, other_token) = fixture.user("other").await;
    let post = fixture.post(&author, false).await;
    let app = app!(fixture);
    let uri = format!("/api/posts/{}", post.id);

    let anonymous = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    let other = test::TestRequest::get()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, other_token))
        .to_request();
    assert_eq!(
        test::call_service(&app, other).await.status(),
        StatusCode::NOT_FOUND
    );

    let own = test::TestRequest::get()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, author_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, own).await;
    assert_eq!(body["author"], "author");
    assert_eq!(body["is_published"], false);
}

#[actix_rt::test]
async fn test_invalid_token_reads_as_anonymous() {
    let fixture = Fixture::new();
    let (author, _) = fixture.user("author").await;
    let post = fixture.post(&author, true).await;
    let app = app!(fixture);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id))
        .insert_header((header::AUTHORIZATION, "Bearer garbage"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_index_page_parameter_is_lenient() {
    let fixture = Fixture::new();
    let (author, _) = fixture.user("author").await;
    for _ in 0..11 {
        fixture.post(&author, true).await;
    }
    let app = app!(fixture);

    let req = test::TestRequest::get().uri("/api/posts?page=abc").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["num_pages"], 2);
    assert_eq!(body["count"], 11);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);
    assert_eq!(body["has_next"], true);

    let req = test::TestRequest::get().uri("/api/posts?page=999").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["page"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["has_previous"], true);
}

#[actix_rt::test]
async fn test_stranger_post_delete_redirects_to_detail() {
    let fixture = Fixture::new();
    let (author, _) = fixture.user("author").await;
    let (_, stranger_token) = fixture.user("stranger").await;
    let post = fixture.post(&author, true).await;
    let app = app!(fixture);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}", post.id))
        .insert_header((header::AUTHORIZATION, stranger_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        format!("/api/posts/{}", post.id).as_str()
    );

    let still_there = BaseRepository::<Post, Uuid>::find_by_id(fixture.store.as_ref(), post.id)
        .await
        .unwrap();
    assert!(still_there.is_some());
}

#[actix_rt::test]
async fn test_stranger_comment_delete_is_forbidden() {
    let fixture = Fixture::new();
    let (author, _) = fixture.user("author").await;
    let (_, stranger_token) = fixture.user("stranger").await;
    let post = fixture.post(&author, true).await;
    let comment = fixture.comment(&post, &author).await;
    let app = app!(fixture);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{}/comments/{}", post.id, comment.id))
        .insert_header((header::AUTHORIZATION, stranger_token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let stored = BaseRepository::<Comment, Uuid>::find_by_id(fixture.store.as_ref(), comment.id)
        .await
        .unwrap();
    assert!(stored.is_some());
}

#[actix_rt::test]
async fn test_create_post_requires_authentication() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({"title": "Hi", "text": "there"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_rt::test]
async fn test_create_post_and_comment() {
    let fixture = Fixture::new();
    let (_, token) = fixture.user("writer").await;
    let app = app!(fixture);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({"title": "Hi", "text": "there"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Value = test::read_body_json(resp).await;
    let post_id = post["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/comments"))
        .insert_header((header::AUTHORIZATION, token))
        .set_json(json!({"text": "  self comment  "}))
        .to_request();
    let comment: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(comment["text"], "self comment");
    assert_eq!(comment["author"], "writer");

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}"))
        .to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["comment_count"], 1);
    assert_eq!(detail["comments"][0]["text"], "self comment");
}

#[actix_rt::test]
async fn test_invalid_post_form_is_unprocessable() {
    let fixture = Fixture::new();
    let (_, token) = fixture.user("writer").await;
    let app = app!(fixture);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header((header::AUTHORIZATION, token))
        .set_json(json!({"title": "", "text": "body", "pub_date": "soon"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["errors"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_register_login_and_me() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "newbie",
            "email": "newbie@example.com",
            "password": "long enough",
            "password_confirm": "long enough",
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "newbie", "password": "wrong password"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"username": "newbie", "password": "long enough"}))
        .to_request();
    let auth: Value = test::call_and_read_body_json(&app, req).await;
    let token = auth["access_token"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["username"], "newbie");
    assert_eq!(me["email"], "newbie@example.com");
}

#[actix_rt::test]
async fn test_profile_shows_hidden_posts_and_owner_flag() {
    let fixture = Fixture::new();
    let (author, token) = fixture.user("author").await;
    fixture.post(&author, true).await;
    fixture.post(&author, false).await;
    let app = app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/profile/author")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["is_owner"], false);
    assert_eq!(body["posts"]["count"], 2);

    let req = test::TestRequest::get()
        .uri("/api/profile/author")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["is_owner"], true);

    let req = test::TestRequest::get()
        .uri("/api/profile/nobody")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn test_unknown_category_is_not_found() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/categories/nowhere")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn test_static_pages() {
    let fixture = Fixture::new();
    let app = app!(fixture);

    for slug in ["about", "rules"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/pages/{slug}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["slug"], slug);
    }
}

#[actix_rt::test]
async fn test_comment_author_follows_profile_rename() {
    let fixture = Fixture::new();
    let (author, token) = fixture.user("oldname").await;
    let post = fixture.post(&author, true).await;
    let app = app!(fixture);

    let req = test::TestRequest::put()
        .uri("/api/profile")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({"username": "newname"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // The token issued before the rename still carries the old username.
    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({"text": "hello"}))
        .to_request();
    let added: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(added["author"], "newname");

    let req = test::TestRequest::put()
        .uri(&format!(
            "/api/posts/{}/comments/{}",
            post.id,
            added["id"].as_str().unwrap()
        ))
        .insert_header((header::AUTHORIZATION, token))
        .set_json(json!({"text": "hello again"}))
        .to_request();
    let edited: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(edited["author"], "newname");

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id))
        .to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["author"], "newname");
    assert_eq!(detail["comments"][0]["author"], "newname");
}

#[actix_rt::test]
async fn test_index_without_page_parameter_is_first_page() {
    let fixture = Fixture::new();
    let (author, _) = fixture.user("author").await;
    for _ in 0..11 {
        fixture.post(&author, true).await;
    }
    let app = app!(fixture);

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["has_previous"], false);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);
}
