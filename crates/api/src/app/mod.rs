//! HTTP application wiring (Axum router + store wiring).
//!
//! Layout:
//! - `services.rs`: store wiring (in-memory or Postgres)
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and shape validation
//! - `problem.rs`: error taxonomy and problem-body responses

use std::sync::Arc;

use axum::{Extension, Router, http::StatusCode, routing::get};
use tower::ServiceBuilder;

pub mod dto;
pub mod problem;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/clients", routes::clients::router())
        .nest("/contracts", routes::contracts::router())
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}

async fn health() -> StatusCode {
    StatusCode::OK
}
