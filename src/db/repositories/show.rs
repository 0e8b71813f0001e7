use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;

use crate::db::entities::{artist, show, venue};

/// A show joined with the names the listing and detail pages display.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct ShowListing {
    pub id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeUtc,
}

pub struct ShowRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ShowRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<show::Model>, DbErr> {
        show::Entity::find_by_id(id).one(self.conn).await
    }

    pub async fn create(&self, show: show::ActiveModel) -> Result<show::Model, DbErr> {
        show.insert(self.conn).await
    }

    /// Every show, soonest first.
    pub async fn listings(&self) -> Result<Vec<ShowListing>, DbErr> {
        self.listings_where(Condition::all()).await
    }

    pub async fn listings_for_venue(&self, venue_id: i32) -> Result<Vec<ShowListing>, DbErr> {
        self.listings_where(Condition::all().add(show::Column::VenueId.eq(venue_id)))
            .await
    }

    pub async fn listings_for_artist(&self, artist_id: i32) -> Result<Vec<ShowListing>, DbErr> {
        self.listings_where(Condition::all().add(show::Column::ArtistId.eq(artist_id)))
            .await
    }

    /// `(venue_id, start_time)` for every show at the given venues.
    pub async fn start_times_for_venues(
        &self,
        venue_ids: Vec<i32>,
    ) -> Result<Vec<(i32, DateTimeUtc)>, DbErr> {
        self.start_times_by(show::Column::VenueId, venue_ids).await
    }

    /// `(artist_id, start_time)` for every show by the given artists.
    pub async fn start_times_for_artists(
        &self,
        artist_ids: Vec<i32>,
    ) -> Result<Vec<(i32, DateTimeUtc)>, DbErr> {
        self.start_times_by(show::Column::ArtistId, artist_ids).await
    }

    async fn start_times_by(
        &self,
        owner: show::Column,
        ids: Vec<i32>,
    ) -> Result<Vec<(i32, DateTimeUtc)>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        show::Entity::find()
            .select_only()
            .column(owner)
            .column(show::Column::StartTime)
            .filter(owner.is_in(ids))
            .order_by_asc(show::Column::Id)
            .into_tuple()
            .all(self.conn)
            .await
    }

    async fn listings_where(&self, condition: Condition) -> Result<Vec<ShowListing>, DbErr> {
        show::Entity::find()
            .select_only()
            .column(show::Column::Id)
            .column(show::Column::VenueId)
            .column_as(venue::Column::Name, "venue_name")
            .column_as(venue::Column::ImageLink, "venue_image_link")
            .column(show::Column::ArtistId)
            .column_as(artist::Column::Name, "artist_name")
            .column_as(artist::Column::ImageLink, "artist_image_link")
            .column(show::Column::StartTime)
            .join(JoinType::InnerJoin, show::Relation::Venue.def())
            .join(JoinType::InnerJoin, show::Relation::Artist.def())
            .filter(condition)
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .into_model::<ShowListing>()
            .all(self.conn)
            .await
    }
}
