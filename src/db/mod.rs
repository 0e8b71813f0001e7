pub mod entities;
pub mod repositories;
pub mod unit_of_work;

pub use entities::*;
pub use unit_of_work::UnitOfWork;
