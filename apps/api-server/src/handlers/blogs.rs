//! Blog endpoints.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use campus_core::domain::{BlogPatch, NewBlog};
use campus_shared::dto::{
    AddCommentRequest, BlogResponse, BlogsResponse, CommentResponse, CommentsResponse,
    CreateBlogRequest, LikeResponse, ListBlogsQuery, MessageResponse, Pagination, TagsResponse,
    UpdateBlogRequest,
};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/blogs - published blogs, newest published first.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListBlogsQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner();
    let page = state.blogs.list(q.page, q.limit, q.tag, q.search).await?;

    Ok(HttpResponse::Ok().json(BlogsResponse {
        success: true,
        blogs: page.blogs,
        pagination: Pagination::new(page.page, page.page_size, page.total),
    }))
}

/// POST /api/blogs
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let blog = state
        .blogs
        .create(
            identity.user_id,
            NewBlog {
                title: req.title,
                content: req.content,
                excerpt: req.excerpt,
                tags: req.tags.unwrap_or_default(),
                featured_image: req.featured_image,
                published: req.published.unwrap_or(false),
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(BlogResponse {
        success: true,
        blog,
        message: Some("Blog created successfully".to_string()),
    }))
}

/// GET /api/blogs/{id} - counts the view; drafts only for their author.
pub async fn get(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let caller = identity.0.map(|i| i.user_id);
    let blog = state.blogs.get(path.into_inner(), caller).await?;

    Ok(HttpResponse::Ok().json(BlogResponse {
        success: true,
        blog,
        message: None,
    }))
}

/// PUT /api/blogs/{id} - partial update, author only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let blog = state
        .blogs
        .update(
            path.into_inner(),
            identity.user_id,
            BlogPatch {
                title: req.title,
                content: req.content,
                excerpt: req.excerpt,
                tags: req.tags,
                featured_image: req.featured_image,
                published: req.published,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(BlogResponse {
        success: true,
        blog,
        message: Some("Blog updated successfully".to_string()),
    }))
}

/// DELETE /api/blogs/{id} - author only.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .blogs
        .delete(path.into_inner(), identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        success: true,
        message: Some("Blog deleted successfully".to_string()),
    }))
}

/// POST /api/blogs/{id}/like - toggle the caller's like.
pub async fn toggle_like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .blogs
        .toggle_like(path.into_inner(), identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(LikeResponse {
        success: true,
        liked: outcome.liked,
        likes_count: outcome.likes_count,
    }))
}

/// POST /api/blogs/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<AddCommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .blogs
        .add_comment(path.into_inner(), identity.user_id, &body.content)
        .await?;

    Ok(HttpResponse::Ok().json(CommentResponse {
        success: true,
        comment,
        message: Some("Comment added successfully".to_string()),
    }))
}

/// GET /api/blogs/{id}/comments - newest first.
pub async fn comments(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let comments = state.blogs.comments(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(CommentsResponse {
        success: true,
        comments,
    }))
}

/// GET /api/blogs/tags - sorted unique tags of published blogs.
pub async fn tags(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.blogs.tags().await?;

    Ok(HttpResponse::Ok().json(TagsResponse {
        success: true,
        tags,
    }))
}
