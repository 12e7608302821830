//! Blog entity for SeaORM.
//!
//! The author snapshot is denormalized into the row; likes and comments live
//! in their own tables so their mutations stay single-row atomic.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use campus_core::domain::{AuthorRef, Blog};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub excerpt: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_email: String,
    /// JSONB list of strings; queried with `@>` containment.
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub featured_image: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub views: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::blog_like::Entity")]
    Likes,
    #[sea_orm(has_many = "super::blog_comment::Entity")]
    Comments,
}

impl Related<super::blog_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl Related<super::blog_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Build the domain blog; the like set and comment list are loaded
    /// separately and attached here.
    pub fn into_blog(
        self,
        likes: Vec<Uuid>,
        comments: Vec<campus_core::domain::Comment>,
    ) -> Blog {
        Blog {
            id: self.id,
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            author: AuthorRef {
                id: self.author_id,
                name: self.author_name,
                email: self.author_email,
            },
            tags: serde_json::from_value(self.tags).unwrap_or_default(),
            featured_image: self.featured_image,
            published: self.published,
            published_at: self.published_at.map(Into::into),
            views: self.views,
            likes,
            comments,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}

impl ActiveModel {
    /// Update payload for an edited blog. The views counter is incremented
    /// atomically in SQL, so the snapshot value carried by `blog` may be
    /// stale; leaving it (and the creation timestamp) unset keeps this write
    /// from undoing a concurrent increment.
    pub fn edit(blog: Blog) -> Self {
        Self {
            views: NotSet,
            created_at: NotSet,
            ..Self::from(blog)
        }
    }
}

impl From<Blog> for ActiveModel {
    fn from(blog: Blog) -> Self {
        Self {
            id: Set(blog.id),
            title: Set(blog.title),
            content: Set(blog.content),
            excerpt: Set(blog.excerpt),
            author_id: Set(blog.author.id),
            author_name: Set(blog.author.name),
            author_email: Set(blog.author.email),
            tags: Set(serde_json::to_value(&blog.tags).unwrap_or_default()),
            featured_image: Set(blog.featured_image),
            published: Set(blog.published),
            published_at: Set(blog.published_at.map(Into::into)),
            views: Set(blog.views),
            created_at: Set(blog.created_at.into()),
            updated_at: Set(blog.updated_at.into()),
        }
    }
}
