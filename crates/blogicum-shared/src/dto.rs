//! Data Transfer Objects - request/response types for the API.
//!
//! Identifiers and timestamps travel as strings (UUIDs and RFC 3339).

use serde::{Deserialize, Serialize};

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub title: String,
    pub description: String,
    pub slug: String,
}

/// A post as it appears in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub text: String,
    pub pub_date: String,
    pub is_published: bool,
    pub author: String,
    pub category: Option<CategoryResponse>,
    pub image: Option<String>,
    pub comment_count: u64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author: String,
    pub text: String,
    pub created_at: String,
}

/// A post with its comments, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub num_pages: u64,
    pub count: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPostsResponse {
    pub category: CategoryResponse,
    pub posts: PageResponse<PostResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: UserResponse,
    /// The viewer owns this profile.
    pub is_owner: bool,
    pub posts: PageResponse<PostResponse>,
}

/// A static informational page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub slug: String,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_detail_flattens_post_fields() {
        let detail = PostDetailResponse {
            post: PostResponse {
                id: "1".into(),
                title: "Hello".into(),
                text: "World".into(),
                pub_date: "2024-05-01T12:00:00+00:00".into(),
                is_published: true,
                author: "jane".into(),
                category: None,
                image: None,
                comment_count: 0,
                created_at: "2024-05-01T12:00:00+00:00".into(),
            },
            comments: Vec::new(),
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["title"], "Hello");
        assert_eq!(json["author"], "jane");
        assert!(json["category"].is_null());
        assert!(json["comments"].as_array().unwrap().is_empty());
    }
}
