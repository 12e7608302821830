//! Ports - trait seams implemented by the infrastructure layer.

mod auth;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use repository::{BlogListQuery, BlogRepository, LikeOutcome, UserRepository};
