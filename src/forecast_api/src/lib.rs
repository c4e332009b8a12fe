//! HTTP surface of the menu forecast service.
//!
//! The router only reads from a [`ForecastService`](menu_forecast::service::ForecastService)
//! that was fully trained before it was handed over.

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use state::AppState;

/// Build the application router around a ready service.
pub fn construct_router(state: AppState) -> Router {
    routes::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
