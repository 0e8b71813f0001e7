//! Test utilities for Fyyur
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test, genre catalog seeded by migration)
//! - AppState factories
//! - Test data factories

use chrono::{DateTime, Utc};
use migration::MigratorTrait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};

use crate::{
    config::{Config, LogFormat, UnmatchedGenrePolicy},
    db::entities::{artist, genre, show, venue},
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Every pooled connection to `sqlite::memory:` would open its own empty database,
/// so the pool is pinned to a single connection.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration with sensible defaults
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 5000,
        unmatched_genres: UnmatchedGenrePolicy::Skip,
        log_format: LogFormat::Pretty,
        log_file: None,
        run_migrations: true,
    }
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state() -> AppState {
    AppState::new(setup_test_db().await, test_config())
}

/// Same as [`setup_test_app_state`] with a different unmatched genre policy
pub async fn setup_test_app_state_with_policy(policy: UnmatchedGenrePolicy) -> AppState {
    let config = Config {
        unmatched_genres: policy,
        ..test_config()
    };
    AppState::new(setup_test_db().await, config)
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test venue in the database
pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venue::Model {
    let venue = venue::ActiveModel {
        name: Set(name.to_string()),
        city: Set(Some(city.to_string())),
        state: Set(Some(state.to_string())),
        address: Set(None),
        phone: Set(None),
        image_link: Set(None),
        website: Set(None),
        facebook_link: Set(None),
        seeking_talent: Set(false),
        seeking_description: Set(None),
        ..Default::default()
    };

    venue.insert(db).await.expect("Failed to insert test venue")
}

/// Create a test artist in the database
pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    let artist = artist::ActiveModel {
        name: Set(name.to_string()),
        city: Set(None),
        state: Set(None),
        phone: Set(None),
        image_link: Set(None),
        website: Set(None),
        facebook_link: Set(None),
        seeking_venue: Set(false),
        seeking_description: Set(None),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

/// Create a test show in the database
pub async fn create_test_show(
    db: &DatabaseConnection,
    artist_id: i32,
    venue_id: i32,
    start_time: DateTime<Utc>,
) -> show::Model {
    let show = show::ActiveModel {
        artist_id: Set(artist_id),
        venue_id: Set(venue_id),
        start_time: Set(start_time),
        ..Default::default()
    };

    show.insert(db).await.expect("Failed to insert test show")
}

/// Look up a seeded genre by name
pub async fn find_genre(db: &DatabaseConnection, name: &str) -> genre::Model {
    genre::Entity::find()
        .filter(genre::Column::Name.eq(name))
        .one(db)
        .await
        .expect("Failed to query genres")
        .unwrap_or_else(|| panic!("Genre {} is not seeded", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        let venues = venue::Entity::find().all(&db).await.unwrap();
        assert_eq!(venues.len(), 0);
    }

    #[tokio::test]
    async fn test_genre_catalog_is_seeded() {
        let db = setup_test_db().await;
        let genres = genre::Entity::find().all(&db).await.unwrap();

        assert_eq!(genres.len(), migration::GENRE_CATALOG.len());
        assert_eq!(find_genre(&db, "Jazz").await.name, "Jazz");
    }

    #[tokio::test]
    async fn test_create_test_show() {
        let db = setup_test_db().await;
        let venue = create_test_venue(&db, "The Blue Note", "Austin", "TX").await;
        let artist = create_test_artist(&db, "Miles").await;
        let start = Utc::now() + Duration::days(3);

        let show = create_test_show(&db, artist.id, venue.id, start).await;

        assert_eq!(show.artist_id, artist.id);
        assert_eq!(show.venue_id, venue.id);
    }

    #[tokio::test]
    async fn test_parallel_databases() {
        // Run two database setups in parallel - they should not interfere
        let (db1, db2) = tokio::join!(setup_test_db(), setup_test_db());

        let venue1 = create_test_venue(&db1, "Venue 1", "Austin", "TX").await;
        let venue2 = create_test_venue(&db2, "Venue 2", "Austin", "TX").await;

        assert_eq!(venue1.id, 1);
        assert_eq!(venue2.id, 1);

        let db1_venues = venue::Entity::find().all(&db1).await.unwrap();
        assert_eq!(db1_venues.len(), 1);
        assert_eq!(db1_venues[0].name, "Venue 1");
    }
}
