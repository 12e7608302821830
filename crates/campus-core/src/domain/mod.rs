//! Domain entities - the core business objects.

mod blog;

mod user;

pub use blog::{
    AuthorRef, Blog, BlogPatch, BlogSummary, Comment, MAX_COMMENT_LEN, MAX_EXCERPT_LEN,
    MAX_TITLE_LEN, NewBlog,
};
pub use user::{User, UserRole};
