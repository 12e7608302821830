//! Blog service behavior over the in-memory repositories.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use campus_core::domain::{BlogPatch, NewBlog, User, UserRole};
use campus_core::error::DomainError;
use campus_core::ports::UserRepository;
use campus_core::service::BlogService;
use campus_infra::{InMemoryBlogRepository, InMemoryUserRepository};

fn service() -> (BlogService, Arc<InMemoryUserRepository>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let blogs = Arc::new(InMemoryBlogRepository::new());
    (BlogService::new(blogs, users.clone()), users)
}

async fn register(users: &InMemoryUserRepository, name: &str) -> Uuid {
    let user = User::new(
        name.to_string(),
        format!("{}@example.com", name.to_lowercase()),
        "hash".to_string(),
        UserRole::Student,
    );
    users.save(user).await.unwrap().id
}

fn input(title: &str, published: bool) -> NewBlog {
    NewBlog {
        title: title.to_string(),
        content: "C".to_string(),
        excerpt: "E".to_string(),
        tags: vec![],
        featured_image: None,
        published,
    }
}

#[tokio::test]
async fn create_snapshots_author_and_starts_at_zero_views() {
    let (svc, users) = service();
    let author = register(&users, "Asha").await;

    let blog = svc.create(author, input("T", false)).await.unwrap();
    assert_eq!(blog.author.id, author);
    assert_eq!(blog.author.name, "Asha");
    assert_eq!(blog.views, 0);
    assert!(blog.published_at.is_none());
}

#[tokio::test]
async fn draft_is_not_found_for_non_authors_but_author_reads_count_views() {
    let (svc, users) = service();
    let author = register(&users, "Asha").await;
    let other = register(&users, "Ravi").await;
    let blog = svc.create(author, input("Draft", false)).await.unwrap();

    assert!(matches!(
        svc.get(blog.id, None).await,
        Err(DomainError::NotFound(_))
    ));
    assert!(matches!(
        svc.get(blog.id, Some(other)).await,
        Err(DomainError::NotFound(_))
    ));

    let first = svc.get(blog.id, Some(author)).await.unwrap();
    assert_eq!(first.views, 1);
    let second = svc.get(blog.id, Some(author)).await.unwrap();
    assert_eq!(second.views, 2);
}

#[tokio::test]
async fn publish_then_edit_keeps_published_at_and_applies_fields() {
    let (svc, users) = service();
    let author = register(&users, "Asha").await;
    let blog = svc.create(author, input("T", false)).await.unwrap();
    assert!(blog.published_at.is_none());

    let published = svc
        .update(
            blog.id,
            author,
            BlogPatch {
                published: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let stamped = published.published_at.expect("set on first publish");

    let edited = svc
        .update(
            blog.id,
            author,
            BlogPatch {
                title: Some("T2".to_string()),
                published: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.title, "T2");
    assert_eq!(edited.published_at, Some(stamped));
}

#[tokio::test]
async fn only_the_author_may_update_or_delete() {
    let (svc, users) = service();
    let author = register(&users, "Asha").await;
    let intruder = register(&users, "Ravi").await;
    let blog = svc.create(author, input("T", true)).await.unwrap();

    assert!(matches!(
        svc.update(blog.id, intruder, BlogPatch::default()).await,
        Err(DomainError::Forbidden)
    ));
    assert!(matches!(
        svc.delete(blog.id, intruder).await,
        Err(DomainError::Forbidden)
    ));

    svc.delete(blog.id, author).await.unwrap();
    assert!(matches!(
        svc.get(blog.id, Some(author)).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn toggling_like_twice_returns_to_the_original_state() {
    let (svc, users) = service();
    let author = register(&users, "Asha").await;
    let reader = register(&users, "Ravi").await;
    let blog = svc.create(author, input("T", true)).await.unwrap();

    let liked = svc.toggle_like(blog.id, reader).await.unwrap();
    assert!(liked.liked);
    assert_eq!(liked.likes_count, 1);

    let unliked = svc.toggle_like(blog.id, reader).await.unwrap();
    assert!(!unliked.liked);
    assert_eq!(unliked.likes_count, 0);
}

#[tokio::test]
async fn like_on_missing_blog_is_not_found() {
    let (svc, users) = service();
    let reader = register(&users, "Ravi").await;
    assert!(matches!(
        svc.toggle_like(Uuid::new_v4(), reader).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn empty_comment_is_rejected_and_nothing_is_stored() {
    let (svc, users) = service();
    let author = register(&users, "Asha").await;
    let blog = svc.create(author, input("T", true)).await.unwrap();

    assert!(matches!(
        svc.add_comment(blog.id, author, "   ").await,
        Err(DomainError::Validation(_))
    ));
    assert!(svc.comments(blog.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn comments_come_back_newest_first() {
    let (svc, users) = service();
    let author = register(&users, "Asha").await;
    let blog = svc.create(author, input("T", true)).await.unwrap();

    svc.add_comment(blog.id, author, "first").await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    svc.add_comment(blog.id, author, "second").await.unwrap();

    let comments = svc.comments(blog.id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "second");
    assert_eq!(comments[1].content, "first");
}

#[tokio::test]
async fn tags_are_deduplicated_sorted_and_published_only() {
    let (svc, users) = service();
    let author = register(&users, "Asha").await;

    let mut a = input("A", true);
    a.tags = vec!["rust".to_string(), "exams".to_string()];
    svc.create(author, a).await.unwrap();

    let mut b = input("B", true);
    b.tags = vec!["rust".to_string(), "algebra".to_string()];
    svc.create(author, b).await.unwrap();

    let mut draft = input("D", false);
    draft.tags = vec!["hidden".to_string()];
    svc.create(author, draft).await.unwrap();

    assert_eq!(svc.tags().await.unwrap(), vec!["algebra", "exams", "rust"]);
}

#[tokio::test]
async fn paging_past_the_end_is_empty_with_accurate_totals() {
    let (svc, users) = service();
    let author = register(&users, "Asha").await;
    for i in 0..3 {
        svc.create(author, input(&format!("B{i}"), true))
            .await
            .unwrap();
    }

    let page = svc.list(Some(5), Some(2), None, None).await.unwrap();
    assert!(page.blogs.is_empty());
    assert_eq!(page.total, 3);
    assert_eq!(page.page, 5);
    assert_eq!(page.page_size, 2);
}

#[tokio::test]
async fn create_by_unknown_account_is_not_found() {
    let (svc, _) = service();
    assert!(matches!(
        svc.create(Uuid::new_v4(), input("T", false)).await,
        Err(DomainError::NotFound(_))
    ));
}
