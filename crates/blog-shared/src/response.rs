//! Non-template responses: error pages and the health check body.

use serde::{Deserialize, Serialize};

/// Content of a rendered error page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPage {
    /// The HTTP status code.
    pub status: u16,

    /// Short summary shown as the page heading.
    pub title: String,

    /// Human-readable explanation, never internal details.
    pub message: String,
}

impl ErrorPage {
    pub fn new(status: u16, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, "Bad Request", message)
    }

    pub fn forbidden() -> Self {
        Self::new(403, "Forbidden", "You are not allowed to do that.")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, "Not Found", message)
    }

    pub fn internal_error() -> Self {
        Self::new(
            500,
            "Internal Server Error",
            "Something went wrong. Please try again later.",
        )
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn ok(version: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            version: version.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
