use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_EXCERPT_LEN: usize = 500;
pub const MAX_COMMENT_LEN: usize = 1000;

/// Author identity frozen into a blog or comment at write time.
///
/// Deliberately a value snapshot, not a live reference: a later profile
/// rename does not rewrite historical posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A comment on a blog. Comments are append-only and displayed newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub author: AuthorRef,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Reserved: no endpoint mutates comment likes yet.
    pub likes: Vec<Uuid>,
}

impl Comment {
    /// Build a comment from trimmed content, validating the length cap.
    pub fn new(author: AuthorRef, content: &str) -> Result<Self, DomainError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::Validation(
                "Comment content is required".to_string(),
            ));
        }
        if content.chars().count() > MAX_COMMENT_LEN {
            return Err(DomainError::Validation(format!(
                "Comment content cannot exceed {MAX_COMMENT_LEN} characters"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            author,
            content: content.to_string(),
            created_at: Utc::now(),
            likes: Vec::new(),
        })
    }
}

/// Blog entity with its like set and comment list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: AuthorRef,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub published: bool,
    /// Set exactly once, at the first false-to-true transition of `published`.
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    /// Logically a set: a user id appears at most once.
    pub likes: Vec<Uuid>,
    /// Stored in insertion order; sorted newest-first at read time.
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a blog.
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub published: bool,
}

/// Partial update. `None` fields keep their prior values.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub published: Option<bool>,
}

/// Listing projection: everything except the full content, with the
/// like set and comment list reduced to counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSummary {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub author: AuthorRef,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub likes_count: u64,
    pub comments_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn cap(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.chars().count() > max {
        return Err(DomainError::Validation(format!(
            "{field} cannot exceed {max} characters"
        )));
    }
    Ok(())
}

impl Blog {
    /// Create a blog authored by `author`, validating required fields and
    /// length caps. `published_at` is stamped only when created published.
    pub fn new(author: AuthorRef, input: NewBlog) -> Result<Self, DomainError> {
        require("Title", &input.title)?;
        require("Content", &input.content)?;
        require("Excerpt", &input.excerpt)?;
        cap("Title", input.title.trim(), MAX_TITLE_LEN)?;
        cap("Excerpt", input.excerpt.trim(), MAX_EXCERPT_LEN)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: input.title.trim().to_string(),
            content: input.content,
            excerpt: input.excerpt.trim().to_string(),
            author,
            tags: normalize_tags(input.tags),
            featured_image: input.featured_image,
            published: input.published,
            published_at: input.published.then_some(now),
            views: 0,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update. Absent or empty-after-trim text fields keep
    /// their prior values; the first publish stamps `published_at` and later
    /// edits never move it.
    pub fn apply(&mut self, patch: BlogPatch) -> Result<(), DomainError> {
        if let Some(title) = patch.title
            && !title.trim().is_empty()
        {
            cap("Title", title.trim(), MAX_TITLE_LEN)?;
            self.title = title.trim().to_string();
        }
        if let Some(content) = patch.content
            && !content.trim().is_empty()
        {
            self.content = content;
        }
        if let Some(excerpt) = patch.excerpt
            && !excerpt.trim().is_empty()
        {
            cap("Excerpt", excerpt.trim(), MAX_EXCERPT_LEN)?;
            self.excerpt = excerpt.trim().to_string();
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(tags);
        }
        if let Some(image) = patch.featured_image {
            self.featured_image = if image.is_empty() { None } else { Some(image) };
        }
        if let Some(published) = patch.published {
            if published && !self.published {
                self.published_at = Some(Utc::now());
            }
            self.published = published;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Reduce to the listing projection.
    pub fn summarize(&self) -> BlogSummary {
        BlogSummary {
            id: self.id,
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            author: self.author.clone(),
            tags: self.tags.clone(),
            featured_image: self.featured_image.clone(),
            published: self.published,
            published_at: self.published_at,
            views: self.views,
            likes_count: self.likes.len() as u64,
            comments_count: self.comments.len() as u64,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Trim tags and drop the ones that end up empty.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
