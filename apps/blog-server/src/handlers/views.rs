//! Domain values rendered as API DTOs.

use blogicum_core::domain::{AuthoredComment, Category, Comment, PostSummary, User};
use blogicum_core::pagination::Page;
use blogicum_core::services::PostDetail;
use blogicum_shared::dto::{
    CategoryResponse, CommentResponse, PageResponse, PostDetailResponse, PostResponse,
    UserResponse,
};

pub fn user(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        created_at: user.created_at.to_rfc3339(),
    }
}

pub fn category(category: &Category) -> CategoryResponse {
    CategoryResponse {
        title: category.title.clone(),
        description: category.description.clone(),
        slug: category.slug.clone(),
    }
}

pub fn post(summary: &PostSummary) -> PostResponse {
    let post = &summary.post;
    PostResponse {
        id: post.id.to_string(),
        title: post.title.clone(),
        text: post.text.clone(),
        pub_date: post.pub_date.to_rfc3339(),
        is_published: post.is_published,
        author: summary.author_username.clone(),
        category: summary.category.as_ref().map(category),
        image: post.image.clone(),
        comment_count: summary.comment_count,
        created_at: post.created_at.to_rfc3339(),
    }
}

pub fn comment(comment: &Comment, author: &str) -> CommentResponse {
    CommentResponse {
        id: comment.id.to_string(),
        post_id: comment.post_id.to_string(),
        author: author.to_string(),
        text: comment.text.clone(),
        created_at: comment.created_at.to_rfc3339(),
    }
}

pub fn post_detail(detail: PostDetail) -> PostDetailResponse {
    let comments: Vec<CommentResponse> = detail
        .comments
        .iter()
        .map(|c: &AuthoredComment| comment(&c.comment, &c.author_username))
        .collect();

    let summary = PostSummary {
        comment_count: comments.len() as u64,
        post: detail.post,
        author_username: detail.author_username,
        category: detail.category,
    };

    PostDetailResponse {
        post: post(&summary),
        comments,
    }
}

pub fn posts_page(page: Page<PostSummary>) -> PageResponse<PostResponse> {
    let has_next = page.has_next();
    let has_previous = page.has_previous();
    PageResponse {
        items: page.items.iter().map(post).collect(),
        page: page.number,
        num_pages: page.num_pages,
        count: page.count,
        has_next,
        has_previous,
    }
}
