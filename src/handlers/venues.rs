use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Utc;
use serde_json::json;

use super::forms::{FormFields, SearchForm};
use crate::{
    error::{AppError, Result},
    services::{BookingService, DirectoryService, VenueInput},
    state::AppState,
    templates::{
        home_page, search_results_page, venue_detail_page, venue_form_page, venues_page,
        FormTarget, Notice, SearchKind,
    },
};

pub async fn list(State(state): State<AppState>) -> Result<Html<String>> {
    let areas = DirectoryService::new(&state.db).venues_by_area(Utc::now()).await?;
    Ok(Html(venues_page(&areas).into_string()))
}

pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>> {
    let term = form.search_term.unwrap_or_default();
    let results = DirectoryService::new(&state.db)
        .search_venues(&term, Utc::now())
        .await?;
    Ok(Html(search_results_page(SearchKind::Venues, &results).into_string()))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Html<String>> {
    let detail = DirectoryService::new(&state.db).venue_detail(id, Utc::now()).await?;
    Ok(Html(venue_detail_page(&detail).into_string()))
}

pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>> {
    let catalog = DirectoryService::new(&state.db).genre_catalog().await?;
    let target = FormTarget {
        title: "List a new venue",
        action: "/venues/create".to_string(),
    };
    Ok(Html(
        venue_form_page(&target, &VenueInput::default(), &catalog, None).into_string(),
    ))
}

/// Always lands on the home page; the notice says whether the venue was listed.
pub async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Html<String> {
    let input = VenueInput::from(&FormFields::from(pairs));
    let booking = BookingService::new(&state.db, state.config.unmatched_genres);

    let notice = match booking.create_venue(&input).await {
        Ok(venue) => Notice::Success(format!("Venue {} was successfully listed!", venue.name)),
        Err(err) => Notice::Error(format!(
            "An error occurred. Venue {} could not be listed. {}",
            input.name,
            err.user_message()
        )),
    };

    Html(home_page(Some(&notice)).into_string())
}

pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Html<String>> {
    let directory = DirectoryService::new(&state.db);
    let venue = directory.find_venue(id).await?;
    let genres = directory.venue_genres(id).await?;
    let catalog = directory.genre_catalog().await?;

    let target = edit_target(id);
    let values = VenueInput::from_existing(venue, &genres);
    Ok(Html(venue_form_page(&target, &values, &catalog, None).into_string()))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response> {
    let input = VenueInput::from(&FormFields::from(pairs));
    let booking = BookingService::new(&state.db, state.config.unmatched_genres);

    match booking.update_venue(id, &input).await {
        Ok(_) => Ok(Redirect::to(&format!("/venues/{}", id)).into_response()),
        Err(err @ AppError::NotFound(_)) => Err(err),
        Err(err) => {
            let catalog = DirectoryService::new(&state.db).genre_catalog().await?;
            let notice = Notice::Error(format!(
                "An error occurred. Venue {} could not be updated. {}",
                input.name,
                err.user_message()
            ));
            let markup = venue_form_page(&edit_target(id), &input, &catalog, Some(&notice));
            Ok((err.status(), Html(markup.into_string())).into_response())
        }
    }
}

/// Answers an HTMX `DELETE`; the client follows `HX-Redirect` back to the listing.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, [(&'static str, &'static str); 1], Json<serde_json::Value>)> {
    BookingService::new(&state.db, state.config.unmatched_genres)
        .delete_venue(id)
        .await?;
    Ok((StatusCode::OK, [("HX-Redirect", "/venues")], Json(json!({}))))
}

fn edit_target(id: i32) -> FormTarget<'static> {
    FormTarget {
        title: "Edit venue",
        action: format!("/venues/{}/edit", id),
    }
}
