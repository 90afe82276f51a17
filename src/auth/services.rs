//! Login and registration service functions.

use sqlx::PgPool;
use tracing::{info, warn};

use crate::error::{AppError, Result};

use super::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User};
use super::queries;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Log a user in by email and password
pub async fn login(pool: &PgPool, req: LoginRequest) -> Result<LoginResponse> {
    let user = queries::find_user_by_email(pool, req.email.trim()).await?;
    let response = check_credentials(user, &req.password);

    match &response {
        Ok(ok) => info!(user_id = ok.user_id, "User logged in"),
        Err(e) => warn!(error = %e, "Login rejected"),
    }
    response
}

/// Decide a login attempt against the stored user row
pub fn check_credentials(user: Option<User>, password: &str) -> Result<LoginResponse> {
    let user = user.ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let user_role = user
        .user_role
        .ok_or_else(|| AppError::Forbidden("Role not assigned yet".to_string()))?;

    if user.password != password {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    Ok(LoginResponse {
        user_id: user.user_id,
        user_name: user.user_name,
        email: user.email,
        user_role,
    })
}

/// Register a new user with no role assigned
pub async fn register(pool: &PgPool, req: RegisterRequest) -> Result<RegisterResponse> {
    let user_name = req.user_name.trim();
    let email = req.email.trim();
    if user_name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "user_name, email and password are required".to_string(),
        ));
    }

    let created = queries::insert_user(pool, user_name, email, &req.password)
        .await?
        .ok_or_else(|| AppError::Conflict("Email already registered".to_string()))?;

    info!(user_id = created.user_id, "Registered user");
    Ok(created)
}
