#[cfg(test)]
mod tests {
    use campus_core::ports::{BlogListQuery, BlogRepository, UserRepository};
    use sea_orm::{
        ActiveValue, DatabaseBackend, EntityTrait, MockDatabase, MockExecResult, QueryFilter,
        QueryTrait,
    };

    use crate::database::entity::{blog, blog_comment, blog_like, user};
    use crate::database::{PostgresBlogRepository, PostgresUserRepository};

    fn blog_model(id: uuid::Uuid, published: bool) -> blog::Model {
        let now = chrono::Utc::now();
        blog::Model {
            id,
            title: "Exam strategies".to_owned(),
            content: "Long form content".to_owned(),
            excerpt: "How to prepare".to_owned(),
            author_id: uuid::Uuid::new_v4(),
            author_name: "Meera".to_owned(),
            author_email: "meera@example.com".to_owned(),
            tags: serde_json::json!(["exams"]),
            featured_image: None,
            published,
            published_at: published.then_some(now.into()),
            views: 3,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn find_blog_by_id_hydrates_likes_and_comments() {
        let blog_id = uuid::Uuid::new_v4();
        let liker = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![blog_model(blog_id, true)]])
            .append_query_results([vec![blog_like::Model {
                blog_id,
                user_id: liker,
                created_at: now.into(),
            }]])
            .append_query_results([vec![blog_comment::Model {
                id: uuid::Uuid::new_v4(),
                blog_id,
                author_id: liker,
                author_name: "Meera".to_owned(),
                author_email: "meera@example.com".to_owned(),
                content: "Great post".to_owned(),
                likes: serde_json::json!([]),
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresBlogRepository::new(std::sync::Arc::new(db));
        let blog = repo.find_by_id(blog_id).await.unwrap().unwrap();

        assert_eq!(blog.id, blog_id);
        assert_eq!(blog.title, "Exam strategies");
        assert_eq!(blog.likes, vec![liker]);
        assert_eq!(blog.comments.len(), 1);
        assert_eq!(blog.comments[0].content, "Great post");
    }

    #[tokio::test]
    async fn increment_views_on_missing_blog_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresBlogRepository::new(std::sync::Arc::new(db));
        let result = repo.increment_views(uuid::Uuid::new_v4()).await;
        assert!(matches!(
            result,
            Err(campus_core::error::RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn find_user_by_email() {
        let user_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user::Model {
                id: user_id,
                name: "Meera".to_owned(),
                email: "meera@example.com".to_owned(),
                password_hash: "hash".to_owned(),
                role: "student".to_owned(),
                phone: None,
                address: None,
                date_of_birth: None,
                profile_image: None,
                is_active: true,
                enrolled_courses: serde_json::json!([]),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(std::sync::Arc::new(db));
        let found = repo.find_by_email("meera@example.com").await.unwrap();

        let user = found.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.role, campus_core::domain::UserRole::Student);
    }

    #[test]
    fn edit_payload_leaves_views_and_created_at_alone() {
        let mut domain = blog_model(uuid::Uuid::new_v4(), true).into_blog(Vec::new(), Vec::new());
        // A concurrent reader bumped the counter after this snapshot was taken.
        domain.views = 5;

        let active = blog::ActiveModel::edit(domain);
        assert!(matches!(active.views, ActiveValue::NotSet));
        assert!(matches!(active.created_at, ActiveValue::NotSet));
        assert!(matches!(active.title, ActiveValue::Set(_)));
        assert!(matches!(active.published, ActiveValue::Set(_)));
    }

    #[test]
    fn search_filter_matches_tag_elements_not_array_rendering() {
        let condition = PostgresBlogRepository::list_condition(&BlogListQuery {
            page: 1,
            page_size: 10,
            tag: None,
            search: Some("rust".to_owned()),
        });
        let sql = blog::Entity::find()
            .filter(condition)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains("jsonb_array_elements_text"));
        assert!(!sql.contains(r#""tags"::text"#));
    }
}
