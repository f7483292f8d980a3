//! Error handling middleware - HTML error pages.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use blog_core::error::DomainError;
use blog_core::ports::{AuthError, TokenError};
use blog_shared::ErrorPage;
use tera::{Context, Tera};

/// Standalone page so errors still render when the template directory is broken.
const ERROR_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ page.status }} {{ page.title }} - Simple Blog</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
</head>
<body>
  <main class="container py-5">
    <h1 class="display-6">{{ page.status }} {{ page.title }}</h1>
    <p class="lead">{{ page.message }}</p>
    <a class="btn btn-primary" href="/">Back to home</a>
  </main>
</body>
</html>
"#;

/// Application-level error type rendered as an HTML error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn page(&self) -> ErrorPage {
        match self {
            AppError::BadRequest(detail) => ErrorPage::bad_request(detail.clone()),
            AppError::Unauthorized => {
                ErrorPage::new(401, "Unauthorized", "Please log in to continue.")
            }
            AppError::Forbidden => ErrorPage::forbidden(),
            AppError::NotFound(detail) => ErrorPage::not_found(detail.clone()),
            AppError::Internal(_) => ErrorPage::internal_error(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        let page = self.page();
        let mut ctx = Context::new();
        ctx.insert("page", &page);

        let body = Tera::one_off(ERROR_TEMPLATE, &ctx, true).unwrap_or_else(|e| {
            tracing::error!(error = ?e, "Error page rendering failed");
            format!("{} {}", page.status, page.title)
        });

        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(body)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(e) => AppError::BadRequest(e.message),
            DomainError::Conflict => AppError::BadRequest(DomainError::Conflict.to_string()),
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{} not found", capitalize(entity_type)))
            }
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::Auth(AuthError::InvalidCredentials) => AppError::Unauthorized,
            DomainError::Auth(AuthError::HashingError(msg)) => {
                AppError::Internal(format!("password hashing: {msg}"))
            }
            DomainError::Repo(e) => {
                tracing::error!(error = %e, "Store operation failed");
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::Internal(format!("session token: {err}"))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use blog_core::ValidationError;
    use uuid::Uuid;

    #[test]
    fn test_domain_error_status_mapping() {
        let cases = [
            (
                AppError::from(DomainError::Validation(ValidationError::new(
                    "title",
                    "title is required",
                ))),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::from(DomainError::Conflict), StatusCode::BAD_REQUEST),
            (
                AppError::from(DomainError::post_not_found(Uuid::new_v4())),
                StatusCode::NOT_FOUND,
            ),
            (AppError::from(DomainError::Forbidden), StatusCode::FORBIDDEN),
            (
                AppError::from(DomainError::Auth(AuthError::InvalidCredentials)),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::from(DomainError::Repo(blog_core::error::RepoError::Query(
                    "boom".into(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[actix_web::test]
    async fn test_internal_error_page_hides_detail() {
        let err = AppError::Internal("connection refused on 10.0.0.5".into());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("500 Internal Server Error"));
        assert!(!html.contains("10.0.0.5"));
    }

    #[actix_web::test]
    async fn test_not_found_page_names_entity() {
        let err = AppError::from(DomainError::post_not_found(Uuid::new_v4()));
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        assert!(std::str::from_utf8(&body).unwrap().contains("Post not found"));
    }
}
