//! Persistence: SeaORM repositories, schema bootstrap, and in-memory stand-ins.

mod connections;
mod memory;

#[cfg(feature = "database")]
mod schema;
#[cfg(feature = "database")]
mod sea_base;
#[cfg(feature = "database")]
pub mod sea_repo;

#[cfg(feature = "database")]
pub mod entity;

pub use connections::{DatabaseConfig, DbDriver, DbUrlParts};
pub use memory::{InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "database")]
pub use connections::DatabaseConnections;
#[cfg(feature = "database")]
pub use schema::ensure_schema;
#[cfg(feature = "database")]
pub use sea_repo::{SeaCommentRepository, SeaPostRepository, SeaUserRepository};
