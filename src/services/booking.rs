use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, Set};
use tracing::{debug, info, warn};

use crate::{
    config::UnmatchedGenrePolicy,
    db::{
        entities::{artist, genre, show, venue},
        UnitOfWork,
    },
    error::{AppError, Result},
};

/// Every editable venue field. Applying it overwrites the stored row wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Vec<String>,
}

/// Every editable artist field. Applying it overwrites the stored row wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub genres: Vec<String>,
}

impl VenueInput {
    /// Prefills an edit form from the stored row.
    pub fn from_existing(venue: venue::Model, genres: &[genre::Model]) -> Self {
        Self {
            name: venue.name,
            city: venue.city,
            state: venue.state,
            address: venue.address,
            phone: venue.phone,
            image_link: venue.image_link,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            genres: genre_names(genres),
        }
    }
}

impl ArtistInput {
    pub fn from_existing(artist: artist::Model, genres: &[genre::Model]) -> Self {
        Self {
            name: artist.name,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            image_link: artist.image_link,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            genres: genre_names(genres),
        }
    }
}

fn genre_names(genres: &[genre::Model]) -> Vec<String> {
    genres.iter().map(|g| g.name.clone()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInput {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

/// Write side of the directory. Each operation is one unit of work: it either
/// commits completely or rolls back and returns the typed error.
pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
    genre_policy: UnmatchedGenrePolicy,
}

impl<'a> BookingService<'a> {
    pub fn new(db: &'a DatabaseConnection, genre_policy: UnmatchedGenrePolicy) -> Self {
        Self { db, genre_policy }
    }

    pub async fn create_venue(&self, input: &VenueInput) -> Result<venue::Model> {
        require_name(&input.name)?;
        let uow = UnitOfWork::begin(self.db).await?;
        let outcome: Result<venue::Model> = async {
            let mut active = venue::ActiveModel::default();
            apply_venue(&mut active, input);
            let created = uow.venues().create(active).await?;

            let genre_ids = self.resolve_genres(&uow, &input.genres).await?;
            uow.venues().replace_genres(created.id, &genre_ids).await?;
            Ok(created)
        }
        .await;

        let created = finish(uow, "create venue", outcome).await?;
        info!("Venue {} listed as {}", created.name, created.id);
        Ok(created)
    }

    pub async fn update_venue(&self, id: i32, input: &VenueInput) -> Result<venue::Model> {
        require_name(&input.name)?;
        let uow = UnitOfWork::begin(self.db).await?;
        let outcome: Result<venue::Model> = async {
            let existing = uow
                .venues()
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

            let mut active: venue::ActiveModel = existing.into();
            apply_venue(&mut active, input);
            let updated = uow.venues().update(active).await?;

            let genre_ids = self.resolve_genres(&uow, &input.genres).await?;
            uow.venues().replace_genres(id, &genre_ids).await?;
            Ok(updated)
        }
        .await;

        let updated = finish(uow, "update venue", outcome).await?;
        info!("Venue {} updated", id);
        Ok(updated)
    }

    pub async fn delete_venue(&self, id: i32) -> Result<()> {
        let uow = UnitOfWork::begin(self.db).await?;
        let outcome: Result<()> = async {
            let deleted = uow.venues().delete(id).await?;
            if deleted.rows_affected == 0 {
                return Err(AppError::NotFound(format!("Venue {} not found", id)));
            }
            Ok(())
        }
        .await;

        finish(uow, "delete venue", outcome).await?;
        info!("Venue {} deleted", id);
        Ok(())
    }

    pub async fn create_artist(&self, input: &ArtistInput) -> Result<artist::Model> {
        require_name(&input.name)?;
        let uow = UnitOfWork::begin(self.db).await?;
        let outcome: Result<artist::Model> = async {
            let mut active = artist::ActiveModel::default();
            apply_artist(&mut active, input);
            let created = uow.artists().create(active).await?;

            let genre_ids = self.resolve_genres(&uow, &input.genres).await?;
            uow.artists().replace_genres(created.id, &genre_ids).await?;
            Ok(created)
        }
        .await;

        let created = finish(uow, "create artist", outcome).await?;
        info!("Artist {} listed as {}", created.name, created.id);
        Ok(created)
    }

    pub async fn update_artist(&self, id: i32, input: &ArtistInput) -> Result<artist::Model> {
        require_name(&input.name)?;
        let uow = UnitOfWork::begin(self.db).await?;
        let outcome: Result<artist::Model> = async {
            let existing = uow
                .artists()
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

            let mut active: artist::ActiveModel = existing.into();
            apply_artist(&mut active, input);
            let updated = uow.artists().update(active).await?;

            let genre_ids = self.resolve_genres(&uow, &input.genres).await?;
            uow.artists().replace_genres(id, &genre_ids).await?;
            Ok(updated)
        }
        .await;

        let updated = finish(uow, "update artist", outcome).await?;
        info!("Artist {} updated", id);
        Ok(updated)
    }

    pub async fn delete_artist(&self, id: i32) -> Result<()> {
        let uow = UnitOfWork::begin(self.db).await?;
        let outcome: Result<()> = async {
            let deleted = uow.artists().delete(id).await?;
            if deleted.rows_affected == 0 {
                return Err(AppError::NotFound(format!("Artist {} not found", id)));
            }
            Ok(())
        }
        .await;

        finish(uow, "delete artist", outcome).await?;
        info!("Artist {} deleted", id);
        Ok(())
    }

    /// Shows are never deduplicated; the same artist may play the same venue at the same time twice.
    pub async fn create_show(&self, input: &ShowInput) -> Result<show::Model> {
        let uow = UnitOfWork::begin(self.db).await?;
        let outcome: Result<show::Model> = async {
            let active = show::ActiveModel {
                artist_id: Set(input.artist_id),
                venue_id: Set(input.venue_id),
                start_time: Set(input.start_time),
                ..Default::default()
            };
            Ok(uow.shows().create(active).await?)
        }
        .await;

        let created = finish(uow, "create show", outcome).await?;
        info!(
            "Show {} listed: artist {} at venue {}",
            created.id, created.artist_id, created.venue_id
        );
        Ok(created)
    }

    /// Resolves submitted genre names to ids, first exact match per name, duplicates collapsed.
    async fn resolve_genres(&self, uow: &UnitOfWork, names: &[String]) -> Result<Vec<i32>> {
        let mut ids = Vec::with_capacity(names.len());

        for name in names {
            let id = match uow.genres().find_by_name(name).await? {
                Some(genre) => genre.id,
                None => match self.genre_policy {
                    UnmatchedGenrePolicy::Skip => {
                        debug!("Skipping unknown genre {:?}", name);
                        continue;
                    }
                    UnmatchedGenrePolicy::Reject => {
                        return Err(AppError::Validation(format!("Unknown genre: {}", name)));
                    }
                    UnmatchedGenrePolicy::Create => {
                        info!("Creating genre {:?}", name);
                        uow.genres().create(name).await?.id
                    }
                },
            };

            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        Ok(ids)
    }
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("The name field is required.".to_string()));
    }
    Ok(())
}

/// Commits on success, rolls back on failure. The unit of work is consumed either way.
async fn finish<T>(uow: UnitOfWork, operation: &str, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(err) => {
            warn!("{} rolled back ({}): {}", operation, err.kind(), err);
            if let Err(rollback_err) = uow.rollback().await {
                warn!("{} rollback failed: {}", operation, rollback_err);
            }
            Err(err)
        }
    }
}

fn apply_venue(active: &mut venue::ActiveModel, input: &VenueInput) {
    active.name = Set(input.name.clone());
    active.city = Set(input.city.clone());
    active.state = Set(input.state.clone());
    active.address = Set(input.address.clone());
    active.phone = Set(input.phone.clone());
    active.image_link = Set(input.image_link.clone());
    active.website = Set(input.website.clone());
    active.facebook_link = Set(input.facebook_link.clone());
    active.seeking_talent = Set(input.seeking_talent);
    active.seeking_description = Set(input.seeking_description.clone());
}

fn apply_artist(active: &mut artist::ActiveModel, input: &ArtistInput) {
    active.name = Set(input.name.clone());
    active.city = Set(input.city.clone());
    active.state = Set(input.state.clone());
    active.phone = Set(input.phone.clone());
    active.image_link = Set(input.image_link.clone());
    active.website = Set(input.website.clone());
    active.facebook_link = Set(input.facebook_link.clone());
    active.seeking_venue = Set(input.seeking_venue);
    active.seeking_description = Set(input.seeking_description.clone());
}
