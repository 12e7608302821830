//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use campus_core::domain::{User, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<Date>,
    pub profile_image: Option<String>,
    pub is_active: bool,
    /// JSONB list of course ids; courses live outside this service.
    #[sea_orm(column_type = "JsonBinary")]
    pub enrolled_courses: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            role: UserRole::parse(&model.role).unwrap_or(UserRole::Student),
            phone: model.phone,
            address: model.address,
            date_of_birth: model.date_of_birth,
            profile_image: model.profile_image,
            is_active: model.is_active,
            enrolled_courses: serde_json::from_value(model.enrolled_courses).unwrap_or_default(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<User> for ActiveModel {
    fn from(user: User) -> Self {
        Self {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            role: Set(user.role.as_str().to_string()),
            phone: Set(user.phone),
            address: Set(user.address),
            date_of_birth: Set(user.date_of_birth),
            profile_image: Set(user.profile_image),
            is_active: Set(user.is_active),
            enrolled_courses: Set(
                serde_json::to_value(&user.enrolled_courses).unwrap_or_default()
            ),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
