//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{
    AuthError, PasswordService, SESSION_TTL_HOURS, TokenClaims, TokenError, TokenService,
};
pub use repository::{BaseRepository, CommentRepository, PostRepository, UserRepository};
