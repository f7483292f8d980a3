//! Idempotent bootstrap data: one admin account, sample posts and comments.

use std::sync::Arc;

use crate::domain::{Comment, Post, PostDraft, User};
use crate::error::DomainError;
use crate::ports::{CommentRepository, PasswordService, PostRepository, UserRepository};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "Admin@123456";

const SAMPLE_POSTS: [(&str, &str, &str, &str, &str); 3] = [
    (
        "Welcome to Simple Blog",
        "This is the first post on Simple Blog. Feel free to explore the features: create posts, leave comments, and manage your profile.",
        "Welcome to Simple Blog, your new Rust-powered blogging platform.",
        "General",
        "welcome,intro",
    ),
    (
        "Getting Started with Rust and Actix",
        "Rust is a statically typed, compiled language focused on safety and performance. Actix Web makes it easy to build fast HTTP servers with clean routing and extractors.",
        "A brief introduction to building web applications with Rust and Actix Web.",
        "Technology",
        "rust,actix,web",
    ),
    (
        "Using PostgreSQL with SeaORM",
        "SeaORM is an async ORM for Rust. Combined with PostgreSQL it provides entity definitions, relations and schema generation from your models.",
        "Learn how to use SeaORM with PostgreSQL in a Rust web application.",
        "Technology",
        "rust,seaorm,postgresql",
    ),
];

const SAMPLE_COMMENTS: [&str; 3] = [
    "Great first post! Looking forward to more content.",
    "Actix is indeed an excellent framework. Thanks for sharing!",
    "Generating the schema straight from the entities is a real time-saver.",
];

/// What a seeding run actually created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub posts_created: usize,
    pub comments_created: usize,
}

pub struct Seeder {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl Seeder {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            users,
            posts,
            comments,
            passwords,
        }
    }

    /// Populate baseline data. Safe to run any number of times.
    pub async fn run(&self) -> Result<SeedReport, DomainError> {
        let mut report = SeedReport::default();

        let admin = self.seed_admin(&mut report).await?;
        let posts = self.seed_posts(&admin, &mut report).await?;
        self.seed_comments(&admin, &posts, &mut report).await?;

        tracing::info!(
            admin_created = report.admin_created,
            posts_created = report.posts_created,
            comments_created = report.comments_created,
            "Database seeding completed"
        );
        Ok(report)
    }

    async fn seed_admin(&self, report: &mut SeedReport) -> Result<User, DomainError> {
        if let Some(admin) = self.users.find_by_username(ADMIN_USERNAME).await? {
            tracing::info!("Admin user already exists, skipping");
            return Ok(admin);
        }

        let hash = self.passwords.hash(ADMIN_PASSWORD)?;
        let admin = User::new(ADMIN_USERNAME.to_string(), ADMIN_EMAIL.to_string(), hash)
            .with_bio("Default administrator account.");
        let admin = self.users.insert(admin).await?;

        report.admin_created = true;
        tracing::info!(user_id = %admin.id, "Created admin user");
        Ok(admin)
    }

    /// Returns the posts sample comments should attach to, oldest first.
    async fn seed_posts(&self, admin: &User, report: &mut SeedReport) -> Result<Vec<Post>, DomainError> {
        if self.posts.count().await? > 0 {
            tracing::info!("Posts already exist, skipping");
            let mut existing = self.posts.find_by_author(admin.id).await?;
            existing.sort_by_key(|p| (p.created_at, p.id));
            return Ok(existing);
        }

        let mut created = Vec::with_capacity(SAMPLE_POSTS.len());
        for (title, content, excerpt, category, tags) in SAMPLE_POSTS {
            let draft = PostDraft {
                title: title.to_string(),
                content: content.to_string(),
                excerpt: excerpt.to_string(),
                category: category.to_string(),
                tags: tags.to_string(),
            };
            created.push(self.posts.insert(Post::new(admin.id, draft)).await?);
        }

        report.posts_created = created.len();
        tracing::info!(count = created.len(), "Created sample posts");
        Ok(created)
    }

    async fn seed_comments(
        &self,
        admin: &User,
        posts: &[Post],
        report: &mut SeedReport,
    ) -> Result<(), DomainError> {
        if self.comments.count().await? > 0 {
            tracing::info!("Comments already exist, skipping");
            return Ok(());
        }

        for (post, text) in posts.iter().zip(SAMPLE_COMMENTS) {
            let comment = Comment::new(post.id, admin.id, text.to_string());
            self.comments.insert(comment).await?;
            report.comments_created += 1;
        }

        tracing::info!(count = report.comments_created, "Created sample comments");
        Ok(())
    }
}
