//! SeaORM entity definitions, one module per table.

pub mod comment;
pub mod post;
pub mod user;
