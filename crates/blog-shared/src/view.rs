//! View models rendered by the HTML templates.
//!
//! Author names are resolved by the caller; a missing author renders as
//! "unknown".

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub const UNKNOWN_AUTHOR: &str = "unknown";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    /// Raw comma-joined value, used to pre-fill the edit form.
    pub tags: String,
    pub tag_list: Vec<String>,
    pub author_id: Uuid,
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub content: String,
    pub author: String,
    pub created_at: String,
}

/// Public profile data. The password hash never reaches a template.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub joined: String,
}

/// Display format for timestamps in every template.
pub fn display_time(at: &DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}
