//! Per-request authorization checks.
//!
//! The caller identity is produced upstream (token middleware); these checks
//! classify a request against a target blog and never touch the store.

use uuid::Uuid;

use crate::domain::Blog;
use crate::error::DomainError;

/// Whether `caller` may read this blog. Drafts are visible to their author
/// only; callers must treat a `false` here as not-found, never as forbidden,
/// so the existence of a draft does not leak.
pub fn can_view(blog: &Blog, caller: Option<Uuid>) -> bool {
    blog.published || caller == Some(blog.author.id)
}

/// Author-only operations (update, delete). Exact id equality against the
/// stored snapshot.
pub fn ensure_author(caller: Uuid, blog: &Blog) -> Result<(), DomainError> {
    if blog.author.id == caller {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthorRef, Blog, NewBlog};

    fn blog(published: bool) -> Blog {
        Blog::new(
            AuthorRef {
                id: Uuid::new_v4(),
                name: "A".to_string(),
                email: "a@example.com".to_string(),
            },
            NewBlog {
                title: "t".to_string(),
                content: "c".to_string(),
                excerpt: "e".to_string(),
                tags: vec![],
                featured_image: None,
                published,
            },
        )
        .unwrap()
    }

    #[test]
    fn published_blogs_are_visible_to_anyone() {
        let b = blog(true);
        assert!(can_view(&b, None));
        assert!(can_view(&b, Some(Uuid::new_v4())));
    }

    #[test]
    fn drafts_are_visible_to_the_author_only() {
        let b = blog(false);
        assert!(!can_view(&b, None));
        assert!(!can_view(&b, Some(Uuid::new_v4())));
        assert!(can_view(&b, Some(b.author.id)));
    }

    #[test]
    fn ensure_author_rejects_everyone_else() {
        let b = blog(true);
        assert!(ensure_author(b.author.id, &b).is_ok());
        assert!(matches!(
            ensure_author(Uuid::new_v4(), &b),
            Err(DomainError::Forbidden)
        ));
    }
}
