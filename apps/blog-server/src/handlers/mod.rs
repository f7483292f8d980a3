//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod users;


use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use crate::middleware::error::{AppError, AppResult};

/// Largest urlencoded body accepted, so long post content fits.
pub const FORM_LIMIT_BYTES: usize = 1024 * 1024;

/// Form extractor settings shared by every route.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().limit(FORM_LIMIT_BYTES)
}

/// Configure all application routes.
///
/// `/posts/new` is registered ahead of `/posts/{id}` so it is never read as an id.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(posts::home))
        .route("/health", web::get().to(health::health_check))
        // Credentials
        .service(
            web::resource("/login")
                .route(web::get().to(users::login_form))
                .route(web::post().to(users::login)),
        )
        .service(
            web::resource("/register")
                .route(web::get().to(users::register_form))
                .route(web::post().to(users::register)),
        )
        .route("/logout", web::post().to(users::logout))
        .route("/profile", web::get().to(users::profile))
        // Content
        .service(
            web::resource("/posts")
                .route(web::get().to(posts::list))
                .route(web::post().to(posts::create)),
        )
        .route("/posts/new", web::get().to(posts::new_form))
        .route("/posts/{id}", web::get().to(posts::show))
        .route("/posts/{id}/edit", web::get().to(posts::edit_form))
        .route("/posts/{id}/update", web::post().to(posts::update))
        .route("/posts/{id}/delete", web::post().to(posts::delete))
        .route("/posts/{id}/comments", web::post().to(comments::create));
}

/// 302 to `location`.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub(crate) fn post_path(id: Uuid) -> String {
    format!("/posts/{id}")
}

/// Parse an id taken from the URL path.
pub(crate) fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid post ID".to_string()))
}
