//! Shared harness for the HTTP tests: a fresh in-memory app per suite.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use serde_json::{Value, json};

use campus_core::ports::{PasswordService, TokenService};
use campus_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

use api_server::handlers;
use api_server::state::AppState;

/// Wire a fresh in-memory state and auth services into the route table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let state = AppState::in_memory();
    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret".to_string(),
        expiration_hours: 1,
        issuer: "campus-test".to_string(),
    }));
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    cfg.app_data(web::Data::new(state))
        .app_data(web::Data::new(token_service))
        .app_data(web::Data::new(password_service));
    handlers::configure_routes(cfg);
}

/// Register an account and return its bearer token.
pub async fn register(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    name: &str,
    email: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": name,
            "email": email,
            "password": "secret-pass",
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "registration should succeed");
    let body: Value = test::read_body_json(resp).await;
    body["token"].as_str().expect("token in response").to_string()
}

/// Create a blog as `token`, returning the response body.
pub async fn create_blog(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    token: &str,
    body: Value,
) -> Value {
    let req = test::TestRequest::post()
        .uri("/api/blogs")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200, "blog creation should succeed");
    test::read_body_json(resp).await
}
