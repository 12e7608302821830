//! Use-case services built on the ports.

mod blogs;

pub use blogs::{BlogPage, BlogService, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
