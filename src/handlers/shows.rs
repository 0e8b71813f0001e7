use axum::{extract::State, response::Html, Form};

use super::forms::FormFields;
use crate::{
    error::Result,
    services::{BookingService, DirectoryService, ShowInput},
    state::AppState,
    templates::{home_page, show_form_page, shows_page, Notice},
};

pub async fn list(State(state): State<AppState>) -> Result<Html<String>> {
    let shows = DirectoryService::new(&state.db).list_shows().await?;
    Ok(Html(shows_page(&shows).into_string()))
}

pub async fn create_form() -> Html<String> {
    Html(show_form_page(None).into_string())
}

pub async fn create(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Html<String> {
    let fields = FormFields::from(pairs);
    let outcome = match ShowInput::try_from(&fields) {
        Ok(input) => {
            BookingService::new(&state.db, state.config.unmatched_genres)
                .create_show(&input)
                .await
        }
        Err(err) => Err(err),
    };

    let notice = match outcome {
        Ok(_) => Notice::Success("Show was successfully listed!".to_string()),
        Err(err) => Notice::Error(format!(
            "An error occurred. Show could not be listed. {}",
            err.user_message()
        )),
    };

    Html(home_page(Some(&notice)).into_string())
}
