use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Blog, BlogSummary, Comment, User};
use crate::error::RepoError;

/// Store-level query for the published-blog listing. Page and size arrive
/// already clamped by the service.
#[derive(Debug, Clone, Default)]
pub struct BlogListQuery {
    pub page: u64,
    pub page_size: u64,
    /// Exact membership in the blog's tag list.
    pub tag: Option<String>,
    /// Case-insensitive substring over title, excerpt, or any tag.
    pub search: Option<String>,
}

impl BlogListQuery {
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.page_size
    }
}

/// Result of an atomic like toggle.
#[derive(Debug, Clone, Copy)]
pub struct LikeOutcome {
    pub liked: bool,
    pub likes_count: u64,
}

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Save a user (create or update).
    async fn save(&self, user: User) -> Result<User, RepoError>;
}

/// Blog repository. Counter and set mutations are dedicated operations so
/// implementations can use the store's atomic primitives instead of
/// read-modify-write.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError>;

    /// Fetch a blog with its like set and comment list loaded.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError>;

    /// Persist the blog's own fields. Likes and comments are untouched.
    async fn update(&self, blog: Blog) -> Result<Blog, RepoError>;

    /// Remove the blog and everything attached to it.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Page of published summaries plus the total match count.
    async fn list(&self, query: &BlogListQuery) -> Result<(Vec<BlogSummary>, u64), RepoError>;

    /// Atomically add 1 to the view counter.
    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError>;

    /// Atomically flip `user_id`'s membership in the like set.
    async fn toggle_like(&self, blog_id: Uuid, user_id: Uuid) -> Result<LikeOutcome, RepoError>;

    /// Append a comment to the blog.
    async fn add_comment(&self, blog_id: Uuid, comment: Comment) -> Result<Comment, RepoError>;

    /// All comments of a blog, insertion order.
    async fn comments(&self, blog_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Tag lists of every published blog, one entry per blog.
    async fn tags_of_published(&self) -> Result<Vec<Vec<String>>, RepoError>;
}
