//! Data Transfer Objects - response payloads of the blog routes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A category or tag reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// Public view of a post's author or last editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover: String,
    pub cover_in_post_content: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Option<TaxonomyResponse>,
    pub tags: Vec<TaxonomyResponse>,
    pub created_by: Option<AuthorResponse>,
    pub updated_by: Option<AuthorResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLinkResponse {
    pub text: String,
    pub url_or_path: String,
    pub new_tab: bool,
}

/// Site-wide presentation settings sent with every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSetupResponse {
    pub title: String,
    pub description: String,
    pub show_header: bool,
    pub show_search: bool,
    pub show_menu: bool,
    pub show_description: bool,
    pub show_pagination: bool,
    pub show_footer: bool,
    pub favicon: String,
    pub menu: Vec<MenuLinkResponse>,
}

/// Page-of-results metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// 1-based number of the page served.
    pub number: u64,
    pub num_pages: u64,
    pub per_page: u64,
    /// Matching posts across all pages.
    pub total: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Payload of every post listing route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingResponse {
    pub page_title: String,
    pub items: Vec<PostResponse>,
    pub pagination: PaginationMeta,
    /// The trimmed search term, only on the search route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_value: Option<String>,
    pub site_setup: Option<SiteSetupResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub page_title: String,
    pub post: PostResponse,
    pub site_setup: Option<SiteSetupResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDetailResponse {
    pub page_title: String,
    pub page: PageResponse,
    pub site_setup: Option<SiteSetupResponse>,
}

/// GET /api/health body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}
