//! Write-side integration tests: every mutation is one transaction that either
//! commits completely or leaves the directory untouched.

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, PaginatorTrait};

use fyyur::config::UnmatchedGenrePolicy;
use fyyur::db::entities::{artist, genre, show, venue};
use fyyur::db::repositories::ShowRepository;
use fyyur::error::AppError;
use fyyur::services::{ArtistInput, BookingService, DirectoryService, ShowInput, VenueInput};
use fyyur::test_utils::*;

fn blue_note(genres: &[&str]) -> VenueInput {
    VenueInput {
        name: "The Blue Note".to_string(),
        city: Some("Austin".to_string()),
        state: Some("TX".to_string()),
        address: Some("1 Main St".to_string()),
        phone: Some("512-555-0100".to_string()),
        seeking_talent: true,
        seeking_description: Some("Looking for trios".to_string()),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        ..Default::default()
    }
}

fn genre_names(genres: Vec<genre::Model>) -> Vec<String> {
    genres.into_iter().map(|g| g.name).collect()
}

#[tokio::test]
async fn test_create_venue_links_genres() {
    let db = setup_test_db().await;
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Skip);

    let venue = booking.create_venue(&blue_note(&["Jazz"])).await.unwrap();

    assert_eq!(venue.name, "The Blue Note");
    assert_eq!(venue.address.as_deref(), Some("1 Main St"));
    assert!(venue.seeking_talent);

    let genres = DirectoryService::new(&db).venue_genres(venue.id).await.unwrap();
    assert_eq!(genre_names(genres), vec!["Jazz".to_string()]);
}

#[tokio::test]
async fn test_unknown_genre_is_skipped_by_default() {
    let db = setup_test_db().await;
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Skip);

    let venue = booking
        .create_venue(&blue_note(&["Jazz", "Nonexistent", "Jazz"]))
        .await
        .unwrap();

    let genres = DirectoryService::new(&db).venue_genres(venue.id).await.unwrap();
    assert_eq!(genre_names(genres), vec!["Jazz".to_string()]);
}

#[tokio::test]
async fn test_unknown_genre_rejected_rolls_back() {
    let db = setup_test_db().await;
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Reject);

    let err = booking
        .create_venue(&blue_note(&["Jazz", "Nonexistent"]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.user_message(), "Unknown genre: Nonexistent");
    // The venue row inserted before the genre lookup is gone
    assert_eq!(venue::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_genre_created_on_demand() {
    let db = setup_test_db().await;
    let before = genre::Entity::find().count(&db).await.unwrap();
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Create);

    let venue = booking
        .create_venue(&blue_note(&["Nonexistent", "Jazz"]))
        .await
        .unwrap();

    let genres = DirectoryService::new(&db).venue_genres(venue.id).await.unwrap();
    assert_eq!(
        genre_names(genres),
        vec!["Jazz".to_string(), "Nonexistent".to_string()]
    );
    assert_eq!(genre::Entity::find().count(&db).await.unwrap(), before + 1);
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let db = setup_test_db().await;
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Skip);

    let input = ArtistInput {
        name: "   ".to_string(),
        ..Default::default()
    };
    let err = booking.create_artist(&input).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(artist::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_artist_keeps_every_field() {
    let db = setup_test_db().await;
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Skip);

    let input = ArtistInput {
        name: "Guns N Petals".to_string(),
        city: Some("San Francisco".to_string()),
        state: Some("CA".to_string()),
        phone: Some("326-123-5000".to_string()),
        image_link: Some("https://example.com/petals.jpg".to_string()),
        website: Some("https://www.gunsnpetalsband.com".to_string()),
        facebook_link: Some("https://www.facebook.com/GunsNPetals".to_string()),
        seeking_venue: true,
        seeking_description: Some("Looking for shows in the Bay Area".to_string()),
        genres: vec!["Rock n Roll".to_string()],
    };

    let created = booking.create_artist(&input).await.unwrap();
    let stored = DirectoryService::new(&db).find_artist(created.id).await.unwrap();
    let genres = DirectoryService::new(&db).artist_genres(created.id).await.unwrap();

    assert_eq!(ArtistInput::from_existing(stored, &genres), input);
}

#[tokio::test]
async fn test_update_venue_overwrites_wholesale() {
    let db = setup_test_db().await;
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Skip);
    let venue = booking.create_venue(&blue_note(&["Jazz"])).await.unwrap();

    let edited = VenueInput {
        name: "The Blue Note Lounge".to_string(),
        city: Some("Austin".to_string()),
        state: Some("TX".to_string()),
        address: Some("2 Main St".to_string()),
        genres: vec!["Blues".to_string(), "Folk".to_string()],
        ..Default::default()
    };
    let updated = booking.update_venue(venue.id, &edited).await.unwrap();

    assert_eq!(updated.id, venue.id);
    assert_eq!(updated.name, "The Blue Note Lounge");
    assert_eq!(updated.address.as_deref(), Some("2 Main St"));
    // Fields left blank on the form are cleared
    assert_eq!(updated.phone, None);
    assert_eq!(updated.seeking_description, None);
    assert!(!updated.seeking_talent);

    let genres = DirectoryService::new(&db).venue_genres(venue.id).await.unwrap();
    assert_eq!(
        genre_names(genres),
        vec!["Blues".to_string(), "Folk".to_string()]
    );
}

#[tokio::test]
async fn test_update_missing_artist_is_not_found() {
    let db = setup_test_db().await;
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Skip);

    let input = ArtistInput {
        name: "Nobody".to_string(),
        ..Default::default()
    };
    let err = booking.update_artist(404, &input).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_venue_removes_its_shows() {
    let db = setup_test_db().await;
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Skip);
    let venue = booking.create_venue(&blue_note(&["Jazz"])).await.unwrap();
    let other = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Miles").await;
    create_test_show(&db, artist.id, venue.id, Utc::now() + Duration::days(1)).await;
    create_test_show(&db, artist.id, other.id, Utc::now() + Duration::days(2)).await;

    booking.delete_venue(venue.id).await.unwrap();

    assert_eq!(venue::Entity::find().count(&db).await.unwrap(), 1);
    let remaining = show::Entity::find().all(&db).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].venue_id, other.id);
}

#[tokio::test]
async fn test_delete_artist_removes_its_shows() {
    let db = setup_test_db().await;
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Skip);
    let artist = booking
        .create_artist(&ArtistInput {
            name: "Guns N Petals".to_string(),
            genres: vec!["Rock n Roll".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    let other = create_test_artist(&db, "Matt Quevedo").await;
    let hop = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let pianos = create_test_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;

    let shows = vec![
        create_test_show(&db, artist.id, hop.id, Utc::now() - Duration::days(4)).await,
        create_test_show(&db, artist.id, pianos.id, Utc::now() + Duration::days(4)).await,
        create_test_show(&db, artist.id, hop.id, Utc::now() + Duration::days(9)).await,
    ];
    let kept = create_test_show(&db, other.id, hop.id, Utc::now()).await;

    booking.delete_artist(artist.id).await.unwrap();

    let repository = ShowRepository::new(&db);
    for show in &shows {
        assert_eq!(repository.find_by_id(show.id).await.unwrap(), None);
    }
    assert_eq!(repository.find_by_id(kept.id).await.unwrap(), Some(kept));
    assert!(DirectoryService::new(&db).artist_genres(artist.id).await.unwrap().is_empty());
    assert_eq!(artist::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(venue::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_delete_missing_records_is_not_found() {
    let db = setup_test_db().await;
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Skip);

    assert!(matches!(booking.delete_venue(7).await, Err(AppError::NotFound(_))));
    assert!(matches!(booking.delete_artist(7).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_create_show_for_existing_pair() {
    let db = setup_test_db().await;
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Skip);
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    let start_time = fyyur::services::parse_start_time("2035-04-01 20:00:00").unwrap();

    let input = ShowInput {
        artist_id: artist.id,
        venue_id: venue.id,
        start_time,
    };
    let first = booking.create_show(&input).await.unwrap();
    let second = booking.create_show(&input).await.unwrap();

    // Identical bookings are not deduplicated
    assert_ne!(first.id, second.id);
    assert_eq!(first.start_time, start_time);
    assert_eq!(show::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_create_show_with_unknown_artist_fails() {
    let db = setup_test_db().await;
    let booking = BookingService::new(&db, UnmatchedGenrePolicy::Skip);
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

    let input = ShowInput {
        artist_id: 999,
        venue_id: venue.id,
        start_time: Utc::now(),
    };
    let err = booking.create_show(&input).await.unwrap_err();

    assert!(matches!(err, AppError::Constraint(_)), "got {:?}", err);
    assert_eq!(show::Entity::find().count(&db).await.unwrap(), 0);
}
