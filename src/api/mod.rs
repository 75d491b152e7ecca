//! API module
//!
//! Contains HTTP request handlers and the router that wires them to paths.

pub mod body;
pub mod health;
pub mod services;

use crate::state::SharedState;
use axum::{routing::get, Router};

/// Build the application routes around the shared state
///
/// Middleware is layered on by the binary; tests use this router as-is.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/services",
            get(services::list_services).post(services::create_service),
        )
        .route(
            "/services/:id",
            get(services::get_service)
                .put(services::update_service)
                .delete(services::delete_service),
        )
        .with_state(state)
}
