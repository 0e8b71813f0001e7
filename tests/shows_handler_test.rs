//! Integration tests for show routes and the site-wide pages

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use fyyur::db::entities::show;
use fyyur::test_utils::*;

fn show_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/shows/create")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_create_show_and_list_it() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    let app = fyyur::create_router(state.clone());

    let response = app
        .clone()
        .oneshot(show_form(&format!(
            "artist_id={}&venue_id={}&start_time=2019-06-15+20%3A00%3A00",
            artist.id, venue.id
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Show was successfully listed!"));

    let response = app
        .oneshot(Request::builder().uri("/shows").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Sat 06, 15, 2019 8:00PM"));
    assert!(body.contains("Guns N Petals"));
    assert!(body.contains("The Musical Hop"));
}

#[tokio::test]
async fn test_create_show_with_bad_start_time() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    let app = fyyur::create_router(state.clone());

    let response = app
        .oneshot(show_form(&format!(
            "artist_id={}&venue_id={}&start_time=next+friday",
            artist.id, venue.id
        )))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("Show could not be listed"));
    assert_eq!(show::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_show_for_unknown_venue() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    let app = fyyur::create_router(state.clone());

    let response = app
        .oneshot(show_form(&format!(
            "artist_id={}&venue_id=999&start_time=2035-01-01+10%3A00%3A00",
            artist.id
        )))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("Show could not be listed"));
    assert_eq!(show::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_home_and_forms_render() {
    let state = setup_test_app_state().await;
    let app = fyyur::create_router(state.clone());

    for uri in ["/", "/shows/create", "/venues/create", "/artists/create"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    }

    let response = app
        .oneshot(Request::builder().uri("/venues/create").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains(r#"<option value="Jazz">"#));
}

#[tokio::test]
async fn test_unknown_route_renders_404_page() {
    let state = setup_test_app_state().await;
    let app = fyyur::create_router(state.clone());

    let response = app
        .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("find that page"));
}

#[tokio::test]
async fn test_health_check() {
    let state = setup_test_app_state().await;
    let app = fyyur::create_router(state.clone());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}
