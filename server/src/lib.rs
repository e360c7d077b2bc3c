//! Harvestcast prediction server
//!
//! A small axum service over a pre-trained harvestcast model: one
//! multipart `POST /predict` endpoint plus a health check.

pub mod error;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

/// Maximum accepted request body size (uploaded images can be large)
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Build the application router
pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/predict", post(routes::predict::predict))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
