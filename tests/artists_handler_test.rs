//! Integration tests for artist routes

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, PaginatorTrait};
use tower::util::ServiceExt;

use fyyur::config::UnmatchedGenrePolicy;
use fyyur::db::entities::{artist, genre, show};
use fyyur::services::DirectoryService;
use fyyur::test_utils::*;

fn form_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
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
async fn test_create_artist_stores_every_field() {
    let state = setup_test_app_state().await;
    let app = fyyur::create_router(state.clone());

    let response = app
        .oneshot(form_request(
            "POST",
            "/artists/create",
            "name=Matt+Quevedo&city=New+York&state=NY&phone=300-400-5000\
             &website=https%3A%2F%2Fmattquevedo.example&facebook_link=https%3A%2F%2Ffacebook.com%2Fmq\
             &image_link=https%3A%2F%2Fimg.example%2Fmq.jpg&seeking_venue=y\
             &seeking_description=Need+a+jazz+room&genres=Jazz",
        ))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("Artist Matt Quevedo was successfully listed!"));

    let stored = artist::Entity::find().one(&state.db).await.unwrap().unwrap();
    assert_eq!(stored.city.as_deref(), Some("New York"));
    assert_eq!(stored.phone.as_deref(), Some("300-400-5000"));
    assert_eq!(stored.website.as_deref(), Some("https://mattquevedo.example"));
    assert_eq!(stored.facebook_link.as_deref(), Some("https://facebook.com/mq"));
    assert_eq!(stored.image_link.as_deref(), Some("https://img.example/mq.jpg"));
    assert!(stored.seeking_venue);
    assert_eq!(stored.seeking_description.as_deref(), Some("Need a jazz room"));
}

#[tokio::test]
async fn test_rejecting_policy_reports_unknown_genre() {
    let state = setup_test_app_state_with_policy(UnmatchedGenrePolicy::Reject).await;
    let app = fyyur::create_router(state.clone());

    let response = app
        .oneshot(form_request(
            "POST",
            "/artists/create",
            "name=The+Wild+Sax+Band&genres=Jazz&genres=Nonexistent",
        ))
        .await
        .unwrap();

    let body = body_string(response).await;
    assert!(body.contains("Artist The Wild Sax Band could not be listed. Unknown genre: Nonexistent"));
    assert_eq!(artist::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_creating_policy_adds_genre() {
    let state = setup_test_app_state_with_policy(UnmatchedGenrePolicy::Create).await;
    let app = fyyur::create_router(state.clone());

    app.oneshot(form_request(
        "POST",
        "/artists/create",
        "name=The+Wild+Sax+Band&genres=Nonexistent",
    ))
    .await
    .unwrap();

    let stored = artist::Entity::find().one(&state.db).await.unwrap().unwrap();
    let genres = DirectoryService::new(&state.db).artist_genres(stored.id).await.unwrap();
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0].name, "Nonexistent");
    assert!(genre::Entity::find().all(&state.db).await.unwrap().contains(&genres[0]));
}

#[tokio::test]
async fn test_artist_list_and_search() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "Guns N Petals").await;
    create_test_artist(&state.db, "Matt Quevedo").await;
    create_test_artist(&state.db, "The Wild Sax Band").await;
    let app = fyyur::create_router(state.clone());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/artists").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Guns N Petals"));
    assert!(body.contains("The Wild Sax Band"));

    let response = app
        .oneshot(form_request("POST", "/artists/search", "search_term=A"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Guns N Petals"));
    assert!(body.contains("Matt Quevedo"));
    assert!(body.contains("The Wild Sax Band"));
}

#[tokio::test]
async fn test_artist_detail_shows_past_performances() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Dueling Pianos Bar", "New York", "NY").await;
    let artist = create_test_artist(&state.db, "Matt Quevedo").await;
    create_test_show(&state.db, artist.id, venue.id, Utc::now() - Duration::days(3)).await;
    let app = fyyur::create_router(state.clone());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/artists/{}", artist.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("1 Past Shows"));
    assert!(body.contains("0 Upcoming Shows"));
    assert!(body.contains(&format!(r#"href="/venues/{}""#, venue.id)));
}

#[tokio::test]
async fn test_edit_artist_replaces_genres() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    let app = fyyur::create_router(state.clone());

    let response = app
        .oneshot(form_request(
            "POST",
            &format!("/artists/{}/edit", artist.id),
            "name=Guns+N+Petals&genres=Rock+n+Roll&genres=Blues",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let genres = DirectoryService::new(&state.db).artist_genres(artist.id).await.unwrap();
    let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Blues", "Rock n Roll"]);
}

#[tokio::test]
async fn test_delete_artist_via_htmx() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    let booked = create_test_show(&state.db, artist.id, venue.id, Utc::now() + Duration::days(1)).await;
    let app = fyyur::create_router(state.clone());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/artists/{}", artist.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("HX-Redirect").unwrap(), "/artists");
    assert_eq!(body_string(response).await, "{}");
    assert_eq!(show::Entity::find_by_id(booked.id).one(&state.db).await.unwrap(), None);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/artists/{}", artist.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_artist_is_404() {
    let state = setup_test_app_state().await;
    let app = fyyur::create_router(state.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/artists/77")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
