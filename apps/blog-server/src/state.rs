//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{
    CommentRepository, PasswordService, PostRepository, TokenService, UserRepository,
};
use blog_core::services::{ContentStore, CredentialStore};
use blog_infra::database::{SeaCommentRepository, SeaPostRepository, SeaUserRepository};
use blog_infra::{Argon2PasswordService, DatabaseConnections, JwtTokenService};

use crate::config::AppConfig;
use crate::views::Views;

/// The three stores behind the services.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    pub fn sea(connections: &DatabaseConnections) -> Self {
        let db = connections.main.clone();
        Self {
            users: Arc::new(SeaUserRepository::new(db.clone())),
            posts: Arc::new(SeaPostRepository::new(db.clone())),
            comments: Arc::new(SeaCommentRepository::new(db)),
        }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        use blog_infra::{InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository};

        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialStore,
    pub content: ContentStore,
    pub tokens: Arc<dyn TokenService>,
    pub views: Arc<Views>,
    pub secure_cookie: bool,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
        views: Views,
        secure_cookie: bool,
    ) -> Self {
        Self {
            credentials: CredentialStore::new(repos.users, passwords),
            content: ContentStore::new(repos.posts, repos.comments),
            tokens,
            views: Arc::new(views),
            secure_cookie,
        }
    }

    /// Build the production state: SeaORM repositories, Argon2 and JWT.
    pub fn from_config(config: &AppConfig, connections: &DatabaseConnections, views: Views) -> Self {
        let state = Self::new(
            Repositories::sea(connections),
            Arc::new(Argon2PasswordService::new()),
            Arc::new(JwtTokenService::new(config.jwt.clone())),
            views,
            config.secure_cookie,
        );

        tracing::info!(secure_cookie = config.secure_cookie, "Application state initialized");
        state
    }
}
