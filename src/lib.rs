//! Fyyur: a directory of venues and artists and the shows booked between them.
//!
//! The library exposes every module so integration tests can drive the router directly.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;
pub mod templates;
pub mod test_utils;

use axum::Router;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // HTML routes (Maud + HTMX)
        .merge(handlers::html_routes())

        // Stylesheets and images
        .nest_service("/static", ServeDir::new("static"))
        .fallback(handlers::pages::not_found)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
