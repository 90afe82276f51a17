//! Login and registration handlers

use axum::{extract::State, routing::post, Json, Router};

use crate::auth::{services, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use super::extract::ApiJson;
use crate::error::Result;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    Ok(Json(services::login(&state.db, body).await?))
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    Ok(Json(services::register(&state.db, body).await?))
}
