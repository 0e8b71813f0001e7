pub mod artists;
pub mod forms;
pub mod health;
pub mod pages;
pub mod shows;
pub mod venues;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn html_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))

        // Venue endpoints
        .route("/venues", get(venues::list))
        .route("/venues/search", post(venues::search))
        .route("/venues/create", get(venues::create_form).post(venues::create))
        .route("/venues/:id", get(venues::detail).delete(venues::delete))
        .route("/venues/:id/edit", get(venues::edit_form).post(venues::edit))

        // Artist endpoints
        .route("/artists", get(artists::list))
        .route("/artists/search", post(artists::search))
        .route("/artists/create", get(artists::create_form).post(artists::create))
        .route("/artists/:id", get(artists::detail).delete(artists::delete))
        .route("/artists/:id/edit", get(artists::edit_form).post(artists::edit))

        // Show endpoints
        .route("/shows", get(shows::list))
        .route("/shows/create", get(shows::create_form).post(shows::create))

        .route("/health", get(health::health_check))
}
