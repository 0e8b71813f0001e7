use sea_orm_migration::prelude::*;

use super::m20240101_000003_create_genres_table::Genres;

/// The genre catalog offered on the venue and artist forms.
///
/// Submissions only ever resolve against these rows unless the server runs
/// with `UNMATCHED_GENRES=create`.
pub const GENRE_CATALOG: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert.into_table(Genres::Table).columns([Genres::Name]);
        for name in GENRE_CATALOG {
            insert.values_panic([(*name).into()]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Genres::Table)
            .and_where(Expr::col(Genres::Name).is_in(GENRE_CATALOG.iter().copied()))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}
