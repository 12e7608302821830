//! Comment entity for SeaORM. Append-only; rows carry their author snapshot.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use campus_core::domain::{AuthorRef, Comment};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub blog_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    /// Reserved JSONB set of user ids; no endpoint mutates it yet.
    #[sea_orm(column_type = "JsonBinary")]
    pub likes: Json,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::blog::Entity",
        from = "Column::BlogId",
        to = "super::blog::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Blog,
}

impl Related<super::blog::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Blog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author: AuthorRef {
                id: model.author_id,
                name: model.author_name,
                email: model.author_email,
            },
            content: model.content,
            created_at: model.created_at.into(),
            likes: serde_json::from_value(model.likes).unwrap_or_default(),
        }
    }
}

impl Model {
    pub fn from_comment(blog_id: Uuid, comment: Comment) -> ActiveModel {
        ActiveModel {
            id: Set(comment.id),
            blog_id: Set(blog_id),
            author_id: Set(comment.author.id),
            author_name: Set(comment.author.name),
            author_email: Set(comment.author.email),
            content: Set(comment.content),
            likes: Set(serde_json::to_value(&comment.likes).unwrap_or_default()),
            created_at: Set(comment.created_at.into()),
        }
    }
}
