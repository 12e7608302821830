//! In-memory repositories - used as fallback when the database is unavailable
//! and as the store behind service and HTTP tests.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use campus_core::domain::{Blog, BlogSummary, Comment, User};
use campus_core::error::RepoError;
use campus_core::ports::{BlogListQuery, BlogRepository, LikeOutcome, UserRepository};

/// In-memory user store using a HashMap behind an async RwLock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if store
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(RepoError::Constraint("Email already registered".to_string()));
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }
}

/// In-memory blog store. The write lock makes each mutation atomic, which is
/// the same unit of atomicity the Postgres implementation gets per row.
#[derive(Default)]
pub struct InMemoryBlogRepository {
    store: RwLock<HashMap<Uuid, Blog>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_search(blog: &Blog, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    blog.title.to_lowercase().contains(&needle)
        || blog.excerpt.to_lowercase().contains(&needle)
        || blog.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut store = self.store.write().await;
        store.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn update(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut store = self.store.write().await;
        let stored = store.get_mut(&blog.id).ok_or(RepoError::NotFound)?;
        // Likes and comments belong to their own operations.
        let mut updated = blog.clone();
        updated.likes = stored.likes.clone();
        updated.comments = stored.comments.clone();
        updated.views = stored.views;
        *stored = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }

    async fn list(&self, query: &BlogListQuery) -> Result<(Vec<BlogSummary>, u64), RepoError> {
        let store = self.store.read().await;
        let mut matches: Vec<&Blog> = store
            .values()
            .filter(|b| b.published)
            .filter(|b| {
                query
                    .tag
                    .as_ref()
                    .is_none_or(|tag| b.tags.iter().any(|t| t == tag))
            })
            .filter(|b| {
                query
                    .search
                    .as_ref()
                    .is_none_or(|needle| matches_search(b, needle))
            })
            .collect();
        matches.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let total = matches.len() as u64;
        let page = matches
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.page_size as usize)
            .map(Blog::summarize)
            .collect();
        Ok((page, total))
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let blog = store.get_mut(&id).ok_or(RepoError::NotFound)?;
        blog.views += 1;
        Ok(())
    }

    async fn toggle_like(&self, blog_id: Uuid, user_id: Uuid) -> Result<LikeOutcome, RepoError> {
        let mut store = self.store.write().await;
        let blog = store.get_mut(&blog_id).ok_or(RepoError::NotFound)?;
        let liked = if blog.likes.contains(&user_id) {
            blog.likes.retain(|id| *id != user_id);
            false
        } else {
            blog.likes.push(user_id);
            true
        };
        Ok(LikeOutcome {
            liked,
            likes_count: blog.likes.len() as u64,
        })
    }

    async fn add_comment(&self, blog_id: Uuid, comment: Comment) -> Result<Comment, RepoError> {
        let mut store = self.store.write().await;
        let blog = store.get_mut(&blog_id).ok_or(RepoError::NotFound)?;
        blog.comments.push(comment.clone());
        Ok(comment)
    }

    async fn comments(&self, blog_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let store = self.store.read().await;
        let blog = store.get(&blog_id).ok_or(RepoError::NotFound)?;
        Ok(blog.comments.clone())
    }

    async fn tags_of_published(&self) -> Result<Vec<Vec<String>>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .values()
            .filter(|b| b.published)
            .map(|b| b.tags.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::domain::{AuthorRef, NewBlog};

    fn author() -> AuthorRef {
        AuthorRef {
            id: Uuid::new_v4(),
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
        }
    }

    fn blog(title: &str, tags: &[&str], published: bool) -> Blog {
        Blog::new(
            author(),
            NewBlog {
                title: title.to_string(),
                content: "content".to_string(),
                excerpt: format!("{title} excerpt"),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                featured_image: None,
                published,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn toggle_like_twice_restores_membership() {
        let repo = InMemoryBlogRepository::new();
        let b = repo.insert(blog("A", &[], true)).await.unwrap();
        let user = Uuid::new_v4();

        let first = repo.toggle_like(b.id, user).await.unwrap();
        assert!(first.liked);
        assert_eq!(first.likes_count, 1);

        let second = repo.toggle_like(b.id, user).await.unwrap();
        assert!(!second.liked);
        assert_eq!(second.likes_count, 0);
    }

    #[tokio::test]
    async fn listing_excludes_drafts() {
        let repo = InMemoryBlogRepository::new();
        repo.insert(blog("Published", &[], true)).await.unwrap();
        repo.insert(blog("Draft", &[], false)).await.unwrap();

        let (page, total) = repo.list(&BlogListQuery {
            page: 1,
            page_size: 10,
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(total, 1);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "Published");
    }

    #[tokio::test]
    async fn listing_filters_by_tag_and_search() {
        let repo = InMemoryBlogRepository::new();
        repo.insert(blog("Rust intro", &["rust"], true)).await.unwrap();
        repo.insert(blog("Math notes", &["algebra"], true))
            .await
            .unwrap();

        let by_tag = repo
            .list(&BlogListQuery {
                page: 1,
                page_size: 10,
                tag: Some("rust".to_string()),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(by_tag.1, 1);
        assert_eq!(by_tag.0[0].title, "Rust intro");

        let by_search = repo
            .list(&BlogListQuery {
                page: 1,
                page_size: 10,
                tag: None,
                search: Some("MATH".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(by_search.1, 1);
        assert_eq!(by_search.0[0].title, "Math notes");
    }

    #[tokio::test]
    async fn update_does_not_clobber_likes_or_views() {
        let repo = InMemoryBlogRepository::new();
        let b = repo.insert(blog("A", &[], true)).await.unwrap();
        repo.toggle_like(b.id, Uuid::new_v4()).await.unwrap();
        repo.increment_views(b.id).await.unwrap();

        // A stale snapshot with no likes must not wipe the stored ones.
        let stale = b.clone();
        repo.update(stale).await.unwrap();

        let stored = repo.find_by_id(b.id).await.unwrap().unwrap();
        assert_eq!(stored.likes.len(), 1);
        assert_eq!(stored.views, 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_constraint_error() {
        let repo = InMemoryUserRepository::new();
        let u = User::new(
            "A".to_string(),
            "a@example.com".to_string(),
            "hash".to_string(),
            campus_core::domain::UserRole::Student,
        );
        repo.save(u).await.unwrap();

        let dup = User::new(
            "B".to_string(),
            "a@example.com".to_string(),
            "hash".to_string(),
            campus_core::domain::UserRole::Student,
        );
        assert!(matches!(
            repo.save(dup).await,
            Err(RepoError::Constraint(_))
        ));
    }
}
