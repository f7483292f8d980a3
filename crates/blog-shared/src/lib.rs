//! # Blog Shared
//!
//! Form payloads posted by the browser and the view models handed to templates.

pub mod dto;
pub mod response;
pub mod view;

pub use response::{ErrorPage, HealthResponse};
pub use view::{CommentView, PostView, UserView};
