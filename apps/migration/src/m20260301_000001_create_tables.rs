use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string())
                    .col(ColumnDef::new(Users::Address).string())
                    .col(ColumnDef::new(Users::DateOfBirth).date())
                    .col(ColumnDef::new(Users::ProfileImage).string())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Users::EnrolledCourses).json_binary().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Blogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Blogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Blogs::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Blogs::Content).text().not_null())
                    .col(ColumnDef::new(Blogs::Excerpt).string_len(500).not_null())
                    .col(ColumnDef::new(Blogs::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Blogs::AuthorName).string().not_null())
                    .col(ColumnDef::new(Blogs::AuthorEmail).string().not_null())
                    .col(ColumnDef::new(Blogs::Tags).json_binary().not_null())
                    .col(ColumnDef::new(Blogs::FeaturedImage).string())
                    .col(
                        ColumnDef::new(Blogs::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Blogs::PublishedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Blogs::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Blogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Blogs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing is always published-only, newest published first.
        manager
            .create_index(
                Index::create()
                    .name("idx_blogs_published_published_at")
                    .table(Blogs::Table)
                    .col(Blogs::Published)
                    .col(Blogs::PublishedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blogs_author_id")
                    .table(Blogs::Table)
                    .col(Blogs::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogLikes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BlogLikes::BlogId).uuid().not_null())
                    .col(ColumnDef::new(BlogLikes::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(BlogLikes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(BlogLikes::BlogId)
                            .col(BlogLikes::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_likes_blog")
                            .from(BlogLikes::Table, BlogLikes::BlogId)
                            .to(Blogs::Table, Blogs::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogComments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogComments::BlogId).uuid().not_null())
                    .col(ColumnDef::new(BlogComments::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(BlogComments::AuthorName).string().not_null())
                    .col(
                        ColumnDef::new(BlogComments::AuthorEmail)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BlogComments::Content)
                            .string_len(1000)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BlogComments::Likes).json_binary().not_null())
                    .col(
                        ColumnDef::new(BlogComments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_comments_blog")
                            .from(BlogComments::Table, BlogComments::BlogId)
                            .to(Blogs::Table, Blogs::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_comments_blog_id")
                    .table(BlogComments::Table)
                    .col(BlogComments::BlogId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogLikes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Blogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    Phone,
    Address,
    DateOfBirth,
    ProfileImage,
    IsActive,
    EnrolledCourses,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Blogs {
    Table,
    Id,
    Title,
    Content,
    Excerpt,
    AuthorId,
    AuthorName,
    AuthorEmail,
    Tags,
    FeaturedImage,
    Published,
    PublishedAt,
    Views,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BlogLikes {
    Table,
    BlogId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BlogComments {
    Table,
    Id,
    BlogId,
    AuthorId,
    AuthorName,
    AuthorEmail,
    Content,
    Likes,
    CreatedAt,
}
