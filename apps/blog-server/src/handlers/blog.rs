//! Blog read handlers: post listings, post and page details.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use inkwell_core::{Listing, PageNumber};

use super::view;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Query string accepted by the listing routes.
///
/// Extracted through a plain map so a repeated key keeps its last value
/// instead of failing the request.
#[derive(Debug, Default)]
pub struct ListingQuery {
    /// Raw page number; anything unparsable falls back to the first page.
    pub page: Option<String>,
    pub search: Option<String>,
}

impl ListingQuery {
    fn page(&self) -> PageNumber {
        PageNumber::parse(self.page.as_deref())
    }
}

impl From<web::Query<HashMap<String, String>>> for ListingQuery {
    fn from(query: web::Query<HashMap<String, String>>) -> Self {
        let mut params = query.into_inner();
        Self {
            page: params.remove("page"),
            search: params.remove("search"),
        }
    }
}

async fn render_listing(state: &AppState, listing: Listing) -> AppResult<HttpResponse> {
    let site_setup = state.blog.site_setup().await?;
    Ok(HttpResponse::Ok().json(view::listing(listing, site_setup)))
}

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let query = ListingQuery::from(query);
    let listing = state.blog.index(query.page()).await?;
    render_listing(&state, listing).await
}

/// GET /category/{slug}/
pub async fn category(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let query = ListingQuery::from(query);
    let listing = state.blog.category(&slug, query.page()).await?;
    render_listing(&state, listing).await
}

/// GET /tag/{slug}/
pub async fn tag(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let query = ListingQuery::from(query);
    let listing = state.blog.tag(&slug, query.page()).await?;
    render_listing(&state, listing).await
}

/// GET /created_by/{id}/
pub async fn created_by(
    state: web::Data<AppState>,
    user_id: web::Path<i64>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let query = ListingQuery::from(query);
    let listing = state
        .blog
        .created_by(user_id.into_inner(), query.page())
        .await?;
    render_listing(&state, listing).await
}

/// GET /search/?search=<text>
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let query = ListingQuery::from(query);
    let term = query.search.as_deref().unwrap_or_default();
    tracing::debug!(term, "Search");

    let listing = state.blog.search(term, query.page()).await?;
    render_listing(&state, listing).await
}

/// GET /post/{slug}/
pub async fn post_detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let detail = state.blog.post_detail(&slug).await?;
    let site_setup = state.blog.site_setup().await?;
    Ok(HttpResponse::Ok().json(view::post_detail(detail, site_setup)))
}

/// GET /page/{slug}/
pub async fn page_detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let detail = state.blog.page_detail(&slug).await?;
    let site_setup = state.blog.site_setup().await?;
    Ok(HttpResponse::Ok().json(view::page_detail(detail, site_setup)))
}
