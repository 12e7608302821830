//! Application state - shared across all handlers.

use std::sync::Arc;

use campus_core::ports::{BlogRepository, UserRepository};
use campus_core::service::BlogService;
use campus_infra::{DatabaseConfig, InMemoryBlogRepository, InMemoryUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub blogs: BlogService,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(config) = db_config {
            match campus_infra::database::connect(config).await {
                Ok(conn) => {
                    // One shared handle; DatabaseConnection itself is not
                    // always Clone (the sea-orm mock feature removes it).
                    let conn = Arc::new(conn);
                    let users: Arc<dyn UserRepository> =
                        Arc::new(campus_infra::PostgresUserRepository::new(conn.clone()));
                    let blogs: Arc<dyn BlogRepository> =
                        Arc::new(campus_infra::PostgresBlogRepository::new(conn));
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        users: users.clone(),
                        blogs: BlogService::new(blogs, users),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        }

        if db_config.is_none() {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }
        Self::in_memory()
    }

    /// In-memory repositories only; used as fallback and by the test suite.
    pub fn in_memory() -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let blogs: Arc<dyn BlogRepository> = Arc::new(InMemoryBlogRepository::new());
        Self {
            users: users.clone(),
            blogs: BlogService::new(blogs, users),
        }
    }
}
