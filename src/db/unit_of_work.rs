use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

use super::repositories::{ArtistRepository, GenreRepository, ShowRepository, VenueRepository};

/// A transaction scope handing out repositories bound to it.
///
/// Nothing written through these repositories is visible to other connections until
/// [`commit`](Self::commit). A unit of work dropped without commit is rolled back.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        Ok(Self {
            txn: db.begin().await?,
        })
    }

    pub fn venues(&self) -> VenueRepository<'_, DatabaseTransaction> {
        VenueRepository::new(&self.txn)
    }

    pub fn artists(&self) -> ArtistRepository<'_, DatabaseTransaction> {
        ArtistRepository::new(&self.txn)
    }

    pub fn genres(&self) -> GenreRepository<'_, DatabaseTransaction> {
        GenreRepository::new(&self.txn)
    }

    pub fn shows(&self) -> ShowRepository<'_, DatabaseTransaction> {
        ShowRepository::new(&self.txn)
    }

    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}
