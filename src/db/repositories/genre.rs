use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

use crate::db::entities::genre;

pub struct GenreRepository<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> GenreRepository<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// The full catalog, alphabetical.
    pub async fn all(&self) -> Result<Vec<genre::Model>, DbErr> {
        genre::Entity::find()
            .order_by_asc(genre::Column::Name)
            .all(self.conn)
            .await
    }

    /// First genre whose name equals `name` exactly.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<genre::Model>, DbErr> {
        genre::Entity::find()
            .filter(genre::Column::Name.eq(name))
            .order_by_asc(genre::Column::Id)
            .one(self.conn)
            .await
    }

    pub async fn create(&self, name: &str) -> Result<genre::Model, DbErr> {
        genre::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }
}
