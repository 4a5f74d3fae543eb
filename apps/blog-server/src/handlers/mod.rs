//! HTTP handlers and route configuration.

mod blog;
mod health;
mod view;

use actix_web::web;

/// Configure all application routes.
///
/// Paths are registered without a trailing slash; `NormalizePath` trims it
/// from incoming requests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(blog::index))
        .route("/post/{slug}", web::get().to(blog::post_detail))
        .route("/page/{slug}", web::get().to(blog::page_detail))
        .route("/created_by/{id}", web::get().to(blog::created_by))
        .route("/category/{slug}", web::get().to(blog::category))
        .route("/tag/{slug}", web::get().to(blog::tag))
        .route("/search", web::get().to(blog::search))
        .service(web::scope("/api").route("/health", web::get().to(health::health_check)));
}
