//! Product records with rule-based price optimization.
//!
//! `pricing` holds the pure engine, `products` the record lifecycle that
//! decides when it runs, and `routes` the JSON API around both.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod pricing;
pub mod products;
pub mod routes;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cache::AppCache;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}

impl AppState {
    pub fn new(db: PgPool, cache: AppCache) -> Self {
        Self { db, cache }
    }
}

/// Build the full application: routes plus tracing, compression and CORS.
pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    routes::router()
        .layer(cors_layer(cors_origins))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS for the configured front-end origins
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
