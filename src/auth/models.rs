//! User rows and auth DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User from the "user" table
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i32,
    pub user_name: String,
    pub password: String,
    pub user_role: Option<i32>,
    pub email: String,
}

/// Request to log in
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: i32,
    pub user_name: String,
    pub email: String,
    pub user_role: i32,
}

/// Request to register a new user
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Response for a successful registration
#[derive(Debug, Serialize, FromRow)]
pub struct RegisterResponse {
    pub user_id: i32,
    pub user_name: String,
    pub email: String,
}
