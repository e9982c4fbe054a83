//! Static informational pages.

use actix_web::HttpResponse;

use blogicum_shared::dto::PageContent;

const ABOUT: &str = "Blogicum is a place to write about anything: travel, \
    cooking, books or the day you just had. Register, publish posts and \
    discuss them with other readers.";

const RULES: &str = "Be polite to other authors and readers. Do not publish \
    content you have no right to share. Posts and comments that break these \
    rules may be hidden by the editors.";

fn page(slug: &str, title: &str, body: &str) -> HttpResponse {
    HttpResponse::Ok().json(PageContent {
        slug: slug.to_string(),
        title: title.to_string(),
        body: body.to_string(),
    })
}

/// GET /api/pages/about
pub async fn about() -> HttpResponse {
    page("about", "About the project", ABOUT)
}

/// GET /api/pages/rules
pub async fn rules() -> HttpResponse {
    page("rules", "Our rules", RULES)
}
