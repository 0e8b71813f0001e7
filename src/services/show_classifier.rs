//! Past/upcoming partitioning of a show collection.
//!
//! Start times are canonical `DateTime<Utc>` values. The only place a textual timestamp
//! enters the system is the show form, parsed by [`parse_start_time`]; the classification
//! itself cannot fail.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::db::repositories::ShowListing;

/// Format accepted for submitted start times, e.g. `2019-06-15 23:00:00`.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a submitted start time. The input carries no zone and is taken as UTC.
pub fn parse_start_time(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), START_TIME_FORMAT).map(|naive| naive.and_utc())
}

/// Anything with a start time.
pub trait Scheduled {
    fn starts_at(&self) -> DateTime<Utc>;
}

impl Scheduled for ShowListing {
    fn starts_at(&self) -> DateTime<Utc> {
        self.start_time
    }
}

impl Scheduled for DateTime<Utc> {
    fn starts_at(&self) -> DateTime<Utc> {
        *self
    }
}

/// Shows split around an instant, each side keeping input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowSchedule<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Default for ShowSchedule<T> {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

impl<T: Scheduled> ShowSchedule<T> {
    /// A show strictly before `now` is past; one at or after `now` is upcoming.
    pub fn classify<I>(shows: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut schedule = Self::default();
        for show in shows {
            if show.starts_at() < now {
                schedule.past.push(show);
            } else {
                schedule.upcoming.push(show);
            }
        }
        schedule
    }
}

impl<T> ShowSchedule<T> {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }

    pub fn total(&self) -> usize {
        self.past.len() + self.upcoming.len()
    }
}

/// Number of start times at or after `now`.
pub fn count_upcoming<I>(start_times: I, now: DateTime<Utc>) -> usize
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    start_times.into_iter().filter(|t| *t >= now).count()
}
