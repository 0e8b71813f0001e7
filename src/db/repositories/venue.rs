use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use super::name_contains;
use crate::db::entities::{genre, venue, venue_genre};

pub struct VenueRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> VenueRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<venue::Model>, DbErr> {
        venue::Entity::find_by_id(id).one(self.conn).await
    }

    pub async fn all(&self) -> Result<Vec<venue::Model>, DbErr> {
        venue::Entity::find()
            .order_by_asc(venue::Column::Id)
            .all(self.conn)
            .await
    }

    /// Venues whose name contains `term`, ignoring case.
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<venue::Model>, DbErr> {
        venue::Entity::find()
            .filter(name_contains(venue::Column::Name, term))
            .order_by_asc(venue::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn create(&self, venue: venue::ActiveModel) -> Result<venue::Model, DbErr> {
        venue.insert(self.conn).await
    }

    pub async fn update(&self, venue: venue::ActiveModel) -> Result<venue::Model, DbErr> {
        venue.update(self.conn).await
    }

    /// Deletes a venue. Its shows and genre links go with it through `ON DELETE CASCADE`.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        venue::Entity::delete_by_id(id).exec(self.conn).await
    }

    pub async fn genres(&self, venue_id: i32) -> Result<Vec<genre::Model>, DbErr> {
        genre::Entity::find()
            .join(JoinType::InnerJoin, genre::Relation::VenueGenres.def())
            .filter(venue_genre::Column::VenueId.eq(venue_id))
            .order_by_asc(genre::Column::Name)
            .all(self.conn)
            .await
    }

    /// Replaces the whole genre set of a venue.
    pub async fn replace_genres(&self, venue_id: i32, genre_ids: &[i32]) -> Result<(), DbErr> {
        venue_genre::Entity::delete_many()
            .filter(venue_genre::Column::VenueId.eq(venue_id))
            .exec(self.conn)
            .await?;

        if genre_ids.is_empty() {
            return Ok(());
        }

        let links = genre_ids.iter().map(|genre_id| venue_genre::ActiveModel {
            genre_id: sea_orm::Set(*genre_id),
            venue_id: sea_orm::Set(venue_id),
        });
        venue_genre::Entity::insert_many(links)
            .exec_without_returning(self.conn)
            .await?;

        Ok(())
    }
}
