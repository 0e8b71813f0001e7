use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use super::name_contains;
use crate::db::entities::{artist, artist_genre, genre};

pub struct ArtistRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ArtistRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<artist::Model>, DbErr> {
        artist::Entity::find_by_id(id).one(self.conn).await
    }

    pub async fn all(&self) -> Result<Vec<artist::Model>, DbErr> {
        artist::Entity::find()
            .order_by_asc(artist::Column::Id)
            .all(self.conn)
            .await
    }

    /// Artists whose name contains `term`, ignoring case.
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<artist::Model>, DbErr> {
        artist::Entity::find()
            .filter(name_contains(artist::Column::Name, term))
            .order_by_asc(artist::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn create(&self, artist: artist::ActiveModel) -> Result<artist::Model, DbErr> {
        artist.insert(self.conn).await
    }

    pub async fn update(&self, artist: artist::ActiveModel) -> Result<artist::Model, DbErr> {
        artist.update(self.conn).await
    }

    /// Deletes an artist. Their shows and genre links go with it through `ON DELETE CASCADE`.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        artist::Entity::delete_by_id(id).exec(self.conn).await
    }

    pub async fn genres(&self, artist_id: i32) -> Result<Vec<genre::Model>, DbErr> {
        genre::Entity::find()
            .join(JoinType::InnerJoin, genre::Relation::ArtistGenres.def())
            .filter(artist_genre::Column::ArtistId.eq(artist_id))
            .order_by_asc(genre::Column::Name)
            .all(self.conn)
            .await
    }

    /// Replaces the whole genre set of an artist.
    pub async fn replace_genres(&self, artist_id: i32, genre_ids: &[i32]) -> Result<(), DbErr> {
        artist_genre::Entity::delete_many()
            .filter(artist_genre::Column::ArtistId.eq(artist_id))
            .exec(self.conn)
            .await?;

        if genre_ids.is_empty() {
            return Ok(());
        }

        let links = genre_ids.iter().map(|genre_id| artist_genre::ActiveModel {
            genre_id: sea_orm::Set(*genre_id),
            artist_id: sea_orm::Set(artist_id),
        });
        artist_genre::Entity::insert_many(links)
            .exec_without_returning(self.conn)
            .await?;

        Ok(())
    }
}
