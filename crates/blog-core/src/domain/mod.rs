//! Domain entities - the core business objects.

mod comment;
mod post;
mod user;

pub use comment::Comment;
pub use post::{Post, PostDraft};
pub use user::{User, mask_email};
