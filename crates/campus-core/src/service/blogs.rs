//! Blog operations: validation, ownership checks and publish bookkeeping
//! layered over the repository ports.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{AuthorRef, Blog, BlogPatch, BlogSummary, Comment, NewBlog};
use crate::error::DomainError;
use crate::guard;
use crate::ports::{BlogListQuery, BlogRepository, LikeOutcome, UserRepository};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// One page of the published-blog listing.
#[derive(Debug, Clone)]
pub struct BlogPage {
    pub blogs: Vec<BlogSummary>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
}

/// Blog use cases. Cheap to clone; holds shared repository handles.
#[derive(Clone)]
pub struct BlogService {
    blogs: Arc<dyn BlogRepository>,
    users: Arc<dyn UserRepository>,
}

impl BlogService {
    pub fn new(blogs: Arc<dyn BlogRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { blogs, users }
    }

    /// Snapshot the caller's current identity from the account store.
    async fn author_snapshot(&self, caller_id: Uuid) -> Result<AuthorRef, DomainError> {
        let user = self
            .users
            .find_by_id(caller_id)
            .await?
            .ok_or(DomainError::NotFound("User"))?;
        Ok(AuthorRef {
            id: user.id,
            name: user.name,
            email: user.email,
        })
    }

    async fn load(&self, id: Uuid) -> Result<Blog, DomainError> {
        self.blogs
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("Blog"))
    }

    /// Create a blog authored by the caller.
    pub async fn create(&self, caller_id: Uuid, input: NewBlog) -> Result<Blog, DomainError> {
        let author = self.author_snapshot(caller_id).await?;
        let blog = Blog::new(author, input)?;
        tracing::debug!(blog_id = %blog.id, published = blog.published, "Creating blog");
        Ok(self.blogs.insert(blog).await?)
    }

    /// Fetch a blog by id, counting the view.
    ///
    /// Drafts read by anyone but their author report not-found, so their
    /// existence does not leak.
    pub async fn get(&self, id: Uuid, caller: Option<Uuid>) -> Result<Blog, DomainError> {
        let mut blog = self.load(id).await?;
        if !guard::can_view(&blog, caller) {
            return Err(DomainError::NotFound("Blog"));
        }
        self.blogs.increment_views(id).await?;
        blog.views += 1;
        Ok(blog)
    }

    /// Published blogs, newest published first.
    ///
    /// Out-of-range paging never errors: a page past the end is an empty
    /// list with accurate totals.
    pub async fn list(
        &self,
        page: Option<i64>,
        limit: Option<i64>,
        tag: Option<String>,
        search: Option<String>,
    ) -> Result<BlogPage, DomainError> {
        let query = BlogListQuery {
            page: clamp_page(page),
            page_size: clamp_page_size(limit),
            tag: tag.filter(|t| !t.is_empty()),
            search: search.filter(|s| !s.is_empty()),
        };
        let (blogs, total) = self.blogs.list(&query).await?;
        Ok(BlogPage {
            blogs,
            page: query.page,
            page_size: query.page_size,
            total,
        })
    }

    /// Partial update, author only.
    pub async fn update(
        &self,
        id: Uuid,
        caller_id: Uuid,
        patch: BlogPatch,
    ) -> Result<Blog, DomainError> {
        let mut blog = self.load(id).await?;
        guard::ensure_author(caller_id, &blog)?;
        blog.apply(patch)?;
        Ok(self.blogs.update(blog).await?)
    }

    /// Delete, author only. Likes and comments go with the blog.
    pub async fn delete(&self, id: Uuid, caller_id: Uuid) -> Result<(), DomainError> {
        let blog = self.load(id).await?;
        guard::ensure_author(caller_id, &blog)?;
        tracing::debug!(blog_id = %id, "Deleting blog");
        Ok(self.blogs.delete(id).await?)
    }

    /// Toggle the caller's like. Toggle-not-set semantics: calling twice
    /// flips the state twice.
    pub async fn toggle_like(&self, id: Uuid, caller_id: Uuid) -> Result<LikeOutcome, DomainError> {
        self.load(id).await?;
        Ok(self.blogs.toggle_like(id, caller_id).await?)
    }

    /// Append a comment with the caller's identity snapshot.
    pub async fn add_comment(
        &self,
        id: Uuid,
        caller_id: Uuid,
        content: &str,
    ) -> Result<Comment, DomainError> {
        let author = self.author_snapshot(caller_id).await?;
        let comment = Comment::new(author, content)?;
        self.load(id).await?;
        Ok(self.blogs.add_comment(id, comment).await?)
    }

    /// All comments of a blog, newest first.
    pub async fn comments(&self, id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.load(id).await?;
        let mut comments = self.blogs.comments(id).await?;
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    /// Unique tags across published blogs, alphabetically sorted.
    pub async fn tags(&self) -> Result<Vec<String>, DomainError> {
        let lists = self.blogs.tags_of_published().await?;
        let unique: std::collections::BTreeSet<String> =
            lists.into_iter().flatten().collect();
        Ok(unique.into_iter().collect())
    }
}

/// Clamping policy for `page`: absent or below 1 becomes 1.
fn clamp_page(page: Option<i64>) -> u64 {
    match page {
        Some(p) if p >= 1 => p as u64,
        _ => 1,
    }
}

/// Clamping policy for `limit`: absent or below 1 becomes the default,
/// anything above the cap is cut to the cap.
fn clamp_page_size(limit: Option<i64>) -> u64 {
    match limit {
        Some(l) if l >= 1 => (l as u64).min(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    }
}
