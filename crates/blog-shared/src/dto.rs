//! Data Transfer Objects - url-encoded form bodies.
//!
//! Every field defaults to empty so a missing input reaches validation
//! instead of failing deserialization.

use serde::{Deserialize, Serialize};

/// Registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Create and edit form for a post. `tags` is the raw comma-joined input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub tags: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub content: String,
}

impl RegisterForm {
    /// Copy safe to echo back into a re-rendered form.
    pub fn without_password(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}

impl LoginForm {
    pub fn without_password(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}
