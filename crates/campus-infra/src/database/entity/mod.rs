//! SeaORM entities backing the domain types.

pub mod blog;
pub mod blog_comment;
pub mod blog_like;
pub mod user;
