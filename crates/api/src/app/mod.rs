//! HTTP application wiring (Axum router + shared ledger state).
//!
//! - `services.rs`: the shared, lock-guarded ledger and the clock
//! - `routes/`: HTTP routes + handlers, one file per area
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use tsbank_core::{Clock, SystemClock};

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router over the wall clock.
pub fn build_app(config: &ApiConfig) -> Router {
    build_app_with_clock(config, Arc::new(SystemClock))
}

/// Build the router with an explicit clock for transfer policy and
/// investment timestamps.
pub fn build_app_with_clock(config: &ApiConfig, clock: Arc<dyn Clock>) -> Router {
    let services = Arc::new(services::AppServices::new(config.ledger_store(), clock));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router().layer(Extension(services)))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_context)))
}
