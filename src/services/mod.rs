pub mod booking;
pub mod directory;
pub mod show_classifier;

pub use booking::{ArtistInput, BookingService, ShowInput, VenueInput};
pub use directory::{
    Area, ArtistDetail, DirectoryService, SearchMatch, SearchResults, VenueDetail, VenueSummary,
};
pub use show_classifier::{parse_start_time, Scheduled, ShowSchedule};
