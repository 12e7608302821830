//! PostgreSQL repository implementations.
//!
//! Counter and like-set mutations go through single-statement SQL so
//! concurrent requests cannot lose updates to a read-modify-write race.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use campus_core::domain::{AuthorRef, Blog, BlogSummary, Comment, User};
use campus_core::error::RepoError;
use campus_core::ports::{BlogListQuery, BlogRepository, LikeOutcome, UserRepository};

use super::entity::{blog, blog_comment, blog_like, user};

fn map_db_err(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else {
        RepoError::Query(err_str)
    }
}

/// Escape LIKE wildcards in user-supplied search text.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// PostgreSQL user repository.
///
/// The connection is shared through an `Arc` so every repository can hold
/// the same pool handle.
pub struct PostgresUserRepository {
    db: Arc<DbConn>,
}

impl PostgresUserRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = match email.find('@') {
            Some(at_pos) if at_pos > 1 => format!("{}***{}", &email[..1], &email[at_pos..]),
            _ => "***".to_string(),
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(result.map(Into::into))
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        use sea_orm::ActiveModelTrait;

        let exists = user::Entity::find_by_id(entity.id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
            .is_some();

        let active: user::ActiveModel = entity.into();
        let model = if exists {
            active.update(self.db.as_ref()).await
        } else {
            active.insert(self.db.as_ref()).await
        }
        .map_err(map_db_err)?;
        Ok(model.into())
    }
}

/// PostgreSQL blog repository over the blogs, blog_likes and blog_comments
/// tables.
pub struct PostgresBlogRepository {
    db: Arc<DbConn>,
}

impl PostgresBlogRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    async fn likes_of(&self, blog_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let rows = blog_like::Entity::find()
            .filter(blog_like::Column::BlogId.eq(blog_id))
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(|r| r.user_id).collect())
    }

    async fn comments_of(&self, blog_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let rows = blog_comment::Entity::find()
            .filter(blog_comment::Column::BlogId.eq(blog_id))
            .order_by_asc(blog_comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Like/comment counts per blog for a page of ids, grouped server-side.
    async fn counts_for<E, C>(&self, ids: &[Uuid], id_col: C) -> Result<HashMap<Uuid, u64>, RepoError>
    where
        E: EntityTrait<Column = C>,
        C: ColumnTrait,
    {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<(Uuid, i64)> = E::find()
            .select_only()
            .column(id_col)
            .column_as(id_col.count(), "cnt")
            .filter(id_col.is_in(ids.iter().copied()))
            .group_by(id_col)
            .into_tuple()
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(|(id, n)| (id, n as u64)).collect())
    }

    pub(crate) fn list_condition(query: &BlogListQuery) -> Condition {
        let mut condition = Condition::all().add(blog::Column::Published.eq(true));

        if let Some(tag) = &query.tag {
            // Exact membership via JSONB containment.
            condition = condition.add(Expr::cust_with_values(
                r#""blogs"."tags" @> ?"#,
                [serde_json::json!([tag])],
            ));
        }

        if let Some(search) = &query.search {
            let pattern = format!("%{}%", escape_like(search));
            condition = condition.add(
                Condition::any()
                    .add(Expr::cust_with_values(
                        r#""blogs"."title" ILIKE ?"#,
                        [pattern.clone()],
                    ))
                    .add(Expr::cust_with_values(
                        r#""blogs"."excerpt" ILIKE ?"#,
                        [pattern.clone()],
                    ))
                    // Per-element tag match; matching the JSON rendering of
                    // the whole array would also hit its punctuation.
                    .add(Expr::cust_with_values(
                        r#"EXISTS (SELECT 1 FROM jsonb_array_elements_text("blogs"."tags") AS t WHERE t ILIKE ?)"#,
                        [pattern],
                    )),
            );
        }

        condition
    }
}

fn summarize(model: blog::Model, likes_count: u64, comments_count: u64) -> BlogSummary {
    BlogSummary {
        id: model.id,
        title: model.title,
        excerpt: model.excerpt,
        author: AuthorRef {
            id: model.author_id,
            name: model.author_name,
            email: model.author_email,
        },
        tags: serde_json::from_value(model.tags).unwrap_or_default(),
        featured_image: model.featured_image,
        published: model.published,
        published_at: model.published_at.map(Into::into),
        views: model.views,
        likes_count,
        comments_count,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn insert(&self, entity: Blog) -> Result<Blog, RepoError> {
        use sea_orm::ActiveModelTrait;

        let active: blog::ActiveModel = entity.into();
        let model = active.insert(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(model.into_blog(Vec::new(), Vec::new()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        let Some(model) = blog::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let likes = self.likes_of(id).await?;
        let comments = self.comments_of(id).await?;
        Ok(Some(model.into_blog(likes, comments)))
    }

    async fn update(&self, entity: Blog) -> Result<Blog, RepoError> {
        use sea_orm::ActiveModelTrait;

        let id = entity.id;
        let likes = entity.likes.clone();
        let comments = entity.comments.clone();

        // views and created_at stay out of the payload: the counter is
        // bumped by concurrent single-statement increments this snapshot
        // must not roll back.
        let active = blog::ActiveModel::edit(entity);
        let model = active.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => map_db_err(other),
        })?;
        Ok(model.into_blog(likes, comments))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = blog::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn list(&self, query: &BlogListQuery) -> Result<(Vec<BlogSummary>, u64), RepoError> {
        let condition = Self::list_condition(query);

        let total = blog::Entity::find()
            .filter(condition.clone())
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        let models = blog::Entity::find()
            .filter(condition)
            .order_by_desc(blog::Column::PublishedAt)
            .offset(query.offset())
            .limit(query.page_size)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let like_counts = self
            .counts_for::<blog_like::Entity, _>(&ids, blog_like::Column::BlogId)
            .await?;
        let comment_counts = self
            .counts_for::<blog_comment::Entity, _>(&ids, blog_comment::Column::BlogId)
            .await?;

        let summaries = models
            .into_iter()
            .map(|m| {
                let likes = like_counts.get(&m.id).copied().unwrap_or(0);
                let comments = comment_counts.get(&m.id).copied().unwrap_or(0);
                summarize(m, likes, comments)
            })
            .collect();
        Ok((summaries, total))
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError> {
        let result = blog::Entity::update_many()
            .col_expr(
                blog::Column::Views,
                Expr::col(blog::Column::Views).add(1),
            )
            .filter(blog::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn toggle_like(&self, blog_id: Uuid, user_id: Uuid) -> Result<LikeOutcome, RepoError> {
        let deleted = blog_like::Entity::delete_many()
            .filter(blog_like::Column::BlogId.eq(blog_id))
            .filter(blog_like::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        let liked = if deleted.rows_affected == 0 {
            // Not present: add. The conflict arm absorbs a concurrent insert
            // of the same pair.
            let insert = blog_like::Entity::insert(blog_like::Model::new(blog_id, user_id))
                .on_conflict(
                    OnConflict::columns([blog_like::Column::BlogId, blog_like::Column::UserId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec(self.db.as_ref())
                .await;
            match insert {
                Ok(_) | Err(DbErr::RecordNotInserted) => true,
                Err(e) => return Err(map_db_err(e)),
            }
        } else {
            false
        };

        let likes_count = blog_like::Entity::find()
            .filter(blog_like::Column::BlogId.eq(blog_id))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(LikeOutcome { liked, likes_count })
    }

    async fn add_comment(&self, blog_id: Uuid, comment: Comment) -> Result<Comment, RepoError> {
        blog_comment::Entity::insert(blog_comment::Model::from_comment(blog_id, comment.clone()))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        Ok(comment)
    }

    async fn comments(&self, blog_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        self.comments_of(blog_id).await
    }

    async fn tags_of_published(&self) -> Result<Vec<Vec<String>>, RepoError> {
        let rows: Vec<serde_json::Value> = blog::Entity::find()
            .select_only()
            .column(blog::Column::Tags)
            .filter(blog::Column::Published.eq(true))
            .into_tuple()
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap_or_default())
            .collect())
    }
}
