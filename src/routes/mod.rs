//! HTTP routes, all mounted under `/api`

pub mod auth;
pub mod extract;
pub mod health;
pub mod products;

use axum::{routing::get, Router};

use crate::AppState;

/// Every API route, without middleware
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        .nest("/api", auth::router())
        .nest("/api/products", products::router())
}
