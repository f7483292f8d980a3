//! Shared fixtures for the infra integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use blog_core::ports::{CommentRepository, PasswordService, PostRepository, UserRepository};
use blog_core::services::{ContentStore, CredentialStore, Seeder};
use blog_infra::Argon2PasswordService;

/// Repositories plus the services wired over them.
pub struct Fixture {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub credentials: CredentialStore,
    pub content: ContentStore,
}

impl Fixture {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        let passwords = fast_passwords();
        Self {
            credentials: CredentialStore::new(users.clone(), passwords.clone()),
            content: ContentStore::new(posts.clone(), comments.clone()),
            users,
            posts,
            comments,
            passwords,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(blog_infra::InMemoryUserRepository::new()),
            Arc::new(blog_infra::InMemoryPostRepository::new()),
            Arc::new(blog_infra::InMemoryCommentRepository::new()),
        )
    }

    pub fn seeder(&self) -> Seeder {
        Seeder::new(
            self.users.clone(),
            self.posts.clone(),
            self.comments.clone(),
            self.passwords.clone(),
        )
    }
}

/// Argon2id with minimal cost so tests stay quick.
pub fn fast_passwords() -> Arc<dyn PasswordService> {
    Arc::new(Argon2PasswordService::with_params(8, 1, 1).expect("valid argon2 params"))
}
