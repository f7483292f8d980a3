//! Application services built on the ports.

mod content;
mod credentials;
mod seeder;

pub use content::{CommentOutcome, ContentStore};
pub use credentials::CredentialStore;
pub use seeder::{ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_USERNAME, SeedReport, Seeder};
