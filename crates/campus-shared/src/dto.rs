//! Data Transfer Objects - request/response types for the API.
//!
//! Wire names are camelCase. Response wrappers are generic over the payload
//! so this crate stays free of domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// "student" (default) or "admin".
    pub role: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub profile_image: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub success: bool,
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub profile_image: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

/// Request to create a blog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub tags: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub published: Option<bool>,
}

/// Partial blog update. Absent fields keep their prior values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub published: Option<bool>,
}

/// Query string of the blog listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBlogsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

/// Request to add a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

/// Pagination descriptor returned with every listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// `total_pages` is `ceil(total_count / page_size)`.
    pub fn new(page: u64, page_size: u64, total_count: u64) -> Self {
        Self {
            page,
            page_size,
            total_count,
            total_pages: total_count.div_ceil(page_size.max(1)),
        }
    }
}

/// `{success, blogs, pagination}` listing envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogsResponse<T> {
    pub success: bool,
    pub blogs: Vec<T>,
    pub pagination: Pagination,
}

/// `{success, blog}` single-blog envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogResponse<T> {
    pub success: bool,
    pub blog: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub success: bool,
    pub liked: bool,
    pub likes_count: u64,
}

/// `{success, comment}` envelope for a created comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse<T> {
    pub success: bool,
    pub comment: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{success, comments}` envelope, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsResponse<T> {
    pub success: bool,
    pub comments: Vec<T>,
}

/// `{success, tags}` envelope, sorted unique strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResponse {
    pub success: bool,
    pub tags: Vec<String>,
}

/// Bare `{success, message}` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
