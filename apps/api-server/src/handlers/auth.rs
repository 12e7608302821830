//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use campus_core::domain::{User, UserRole};
use campus_core::ports::{PasswordService, TokenService};
use campus_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MAX_NAME_LEN: usize = 50;
const MIN_PASSWORD_LEN: usize = 6;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Name cannot be more than {MAX_NAME_LEN} characters"
        )));
    }
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    let role = match req.role.as_deref() {
        None => UserRole::Student,
        Some(r) => UserRole::parse(r)
            .ok_or_else(|| AppError::BadRequest("Role must be student or admin".to_string()))?,
    };

    // Check if the email is already taken
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    // Hash password
    let password_hash = password_service.hash(&req.password)?;

    // Create user
    let mut user = User::new(name.to_string(), email, password_hash, role);
    user.phone = req.phone;
    user.address = req.address;
    user.date_of_birth = req.date_of_birth;
    user.profile_image = req.profile_image;
    let saved = state.users.save(user).await?;

    let token = token_service.generate_token(saved.id, &saved.email, saved.role)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        success: true,
        token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = req.email.trim().to_lowercase();

    // Uniform 401 whatever the reason, to avoid probing for accounts.
    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service.verify(&req.password, &user.password_hash)?;
    if !valid || !user.is_active {
        return Err(AppError::Unauthorized);
    }

    let token = token_service.generate_token(user.id, &user.email, user.role)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        success: true,
        token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse {
        success: true,
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role.as_str().to_string(),
        phone: user.phone,
        address: user.address,
        date_of_birth: user.date_of_birth,
        profile_image: user.profile_image,
        is_active: user.is_active,
        created_at: user.created_at.to_rfc3339(),
    }))
}
