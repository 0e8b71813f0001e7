use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::{
    db::{
        entities::{artist, genre, venue},
        repositories::{
            ArtistRepository, GenreRepository, ShowListing, ShowRepository, VenueRepository,
        },
    },
    error::{AppError, Result},
    services::show_classifier::{count_upcoming, ShowSchedule},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing a city and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: Option<String>,
    pub state: Option<String>,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<SearchMatch>,
}

#[derive(Debug, Clone)]
pub struct VenueDetail {
    pub venue: venue::Model,
    pub genres: Vec<genre::Model>,
    pub shows: ShowSchedule<ShowListing>,
}

#[derive(Debug, Clone)]
pub struct ArtistDetail {
    pub artist: artist::Model,
    pub genres: Vec<genre::Model>,
    pub shows: ShowSchedule<ShowListing>,
}

/// Read side of the directory: listings, search and detail pages.
pub struct DirectoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DirectoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Groups every venue under its (city, state), areas ordered by state then city.
    pub async fn venues_by_area(&self, now: DateTime<Utc>) -> Result<Vec<Area>> {
        let venues = VenueRepository::new(self.db).all().await?;
        let upcoming = self
            .upcoming_by_venue(venues.iter().map(|v| v.id).collect(), now)
            .await?;

        let mut areas: Vec<Area> = Vec::new();
        for venue in venues {
            let summary = VenueSummary {
                id: venue.id,
                num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
                name: venue.name,
            };

            match areas
                .iter_mut()
                .find(|a| a.city == venue.city && a.state == venue.state)
            {
                Some(area) => area.venues.push(summary),
                None => areas.push(Area {
                    city: venue.city,
                    state: venue.state,
                    venues: vec![summary],
                }),
            }
        }

        areas.sort_by(|a, b| (&a.state, &a.city).cmp(&(&b.state, &b.city)));
        Ok(areas)
    }

    pub async fn search_venues(&self, term: &str, now: DateTime<Utc>) -> Result<SearchResults> {
        let venues = VenueRepository::new(self.db).search_by_name(term).await?;
        let upcoming = self
            .upcoming_by_venue(venues.iter().map(|v| v.id).collect(), now)
            .await?;

        Ok(search_results(
            term,
            venues.into_iter().map(|v| (v.id, v.name)),
            &upcoming,
        ))
    }

    pub async fn search_artists(&self, term: &str, now: DateTime<Utc>) -> Result<SearchResults> {
        let artists = ArtistRepository::new(self.db).search_by_name(term).await?;
        let upcoming = self
            .upcoming_by_artist(artists.iter().map(|a| a.id).collect(), now)
            .await?;

        Ok(search_results(
            term,
            artists.into_iter().map(|a| (a.id, a.name)),
            &upcoming,
        ))
    }

    pub async fn list_artists(&self) -> Result<Vec<artist::Model>> {
        Ok(ArtistRepository::new(self.db).all().await?)
    }

    pub async fn list_shows(&self) -> Result<Vec<ShowListing>> {
        Ok(ShowRepository::new(self.db).listings().await?)
    }

    pub async fn genre_catalog(&self) -> Result<Vec<genre::Model>> {
        Ok(GenreRepository::new(self.db).all().await?)
    }

    pub async fn find_venue(&self, id: i32) -> Result<venue::Model> {
        VenueRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))
    }

    pub async fn find_artist(&self, id: i32) -> Result<artist::Model> {
        ArtistRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))
    }

    pub async fn venue_genres(&self, id: i32) -> Result<Vec<genre::Model>> {
        Ok(VenueRepository::new(self.db).genres(id).await?)
    }

    pub async fn artist_genres(&self, id: i32) -> Result<Vec<genre::Model>> {
        Ok(ArtistRepository::new(self.db).genres(id).await?)
    }

    pub async fn venue_detail(&self, id: i32, now: DateTime<Utc>) -> Result<VenueDetail> {
        let venue = self.find_venue(id).await?;
        let genres = self.venue_genres(id).await?;
        let shows = ShowRepository::new(self.db).listings_for_venue(id).await?;

        Ok(VenueDetail {
            venue,
            genres,
            shows: ShowSchedule::classify(shows, now),
        })
    }

    pub async fn artist_detail(&self, id: i32, now: DateTime<Utc>) -> Result<ArtistDetail> {
        let artist = self.find_artist(id).await?;
        let genres = self.artist_genres(id).await?;
        let shows = ShowRepository::new(self.db).listings_for_artist(id).await?;

        Ok(ArtistDetail {
            artist,
            genres,
            shows: ShowSchedule::classify(shows, now),
        })
    }

    async fn upcoming_by_venue(
        &self,
        venue_ids: Vec<i32>,
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, usize>> {
        let start_times = ShowRepository::new(self.db)
            .start_times_for_venues(venue_ids)
            .await?;
        Ok(upcoming_per_owner(start_times, now))
    }

    async fn upcoming_by_artist(
        &self,
        artist_ids: Vec<i32>,
        now: DateTime<Utc>,
    ) -> Result<HashMap<i32, usize>> {
        let start_times = ShowRepository::new(self.db)
            .start_times_for_artists(artist_ids)
            .await?;
        Ok(upcoming_per_owner(start_times, now))
    }
}

fn upcoming_per_owner(
    start_times: Vec<(i32, DateTime<Utc>)>,
    now: DateTime<Utc>,
) -> HashMap<i32, usize> {
    let mut grouped: HashMap<i32, Vec<DateTime<Utc>>> = HashMap::new();
    for (owner, start_time) in start_times {
        grouped.entry(owner).or_default().push(start_time);
    }

    grouped
        .into_iter()
        .map(|(owner, times)| (owner, count_upcoming(times, now)))
        .collect()
}

fn search_results(
    term: &str,
    matches: impl Iterator<Item = (i32, String)>,
    upcoming: &HashMap<i32, usize>,
) -> SearchResults {
    let data: Vec<SearchMatch> = matches
        .map(|(id, name)| SearchMatch {
            id,
            name,
            num_upcoming_shows: upcoming.get(&id).copied().unwrap_or(0),
        })
        .collect();

    SearchResults {
        search_term: term.to_string(),
        count: data.len(),
        data,
    }
}
