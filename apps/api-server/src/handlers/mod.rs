//! HTTP handlers and route configuration.

mod auth;
mod blogs;
mod health;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Blog routes; /tags is registered before /{id} so it is not
            // captured as a blog id.
            .service(
                web::scope("/blogs")
                    .route("", web::get().to(blogs::list))
                    .route("", web::post().to(blogs::create))
                    .route("/tags", web::get().to(blogs::tags))
                    .route("/{id}", web::get().to(blogs::get))
                    .route("/{id}", web::put().to(blogs::update))
                    .route("/{id}", web::delete().to(blogs::delete))
                    .route("/{id}/like", web::post().to(blogs::toggle_like))
                    .route("/{id}/comments", web::get().to(blogs::comments))
                    .route("/{id}/comments", web::post().to(blogs::add_comment)),
            ),
    );
}
