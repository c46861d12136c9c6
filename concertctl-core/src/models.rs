//! Row types for the `bands`, `venues`, and `concerts` tables
//!
//! Bands and venues are pre-existing; concerts are only ever inserted.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A performing entity with a hometown city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Band {
    pub id: i32,
    pub name: String,
    pub hometown: String,
}

/// A location hosting concerts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i32,
    pub title: String,
    pub city: String,
}

/// One band playing one venue on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Concert {
    pub id: i32,
    pub band_id: i32,
    pub venue_id: i32,
    pub concert_date: NaiveDate,
}

/// Band row joined with its concert count (aggregate queries)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BandPerformances {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub band: Band,
    pub performance_count: i64,
}

impl Band {
    /// A hometown show is one where the venue sits in the band's hometown.
    pub fn is_hometown_of(&self, venue: &Venue) -> bool {
        self.hometown == venue.city
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({})", self.id, self.name, self.hometown)
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}, {}", self.id, self.title, self.city)
    }
}

impl fmt::Display for Concert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} band {} @ venue {} on {}",
            self.id, self.band_id, self.venue_id, self.concert_date
        )
    }
}

impl fmt::Display for BandPerformances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.performance_count == 1 {
            "performance"
        } else {
            "performances"
        };
        write!(f, "{} - {} {}", self.band, self.performance_count, noun)
    }
}

/// Build the stage greeting for a band playing in `city`.
pub fn introduction(city: &str, band_name: &str, hometown: &str) -> String {
    format!("Hello {city}!!!!! We are {band_name} and we're from {hometown}")
}
