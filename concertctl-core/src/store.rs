//! The query/command surface over bands, venues, and concerts
//!
//! Implemented by [`PgConcertRepository`](crate::PgConcertRepository) for a
//! live database and by `MemoryConcertStore` (feature `testkit`) for tests.
//!
//! Single-row lookups return `Option`. Values derived from a concert's
//! linked rows (hometown check, introduction) return
//! [`ConcertError::NotFound`](crate::ConcertError::NotFound) when the concert
//! has no such rows.
//!
//! Receivers are `&mut self`: one store owns one connection and runs one
//! statement at a time. [`close`](ConcertStore::close) consumes the store.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Band, BandPerformances, Concert, Venue};

#[async_trait]
pub trait ConcertStore: Send {
    /// Band playing the given concert.
    async fn band_for_concert(&mut self, concert_id: i32) -> Result<Option<Band>>;

    /// Venue hosting the given concert.
    async fn venue_for_concert(&mut self, concert_id: i32) -> Result<Option<Venue>>;

    /// Concerts at a venue, in insertion order.
    async fn concerts_for_venue(&mut self, venue_id: i32) -> Result<Vec<Concert>>;

    /// Distinct bands that have played a venue, ordered by band id.
    async fn bands_for_venue(&mut self, venue_id: i32) -> Result<Vec<Band>>;

    /// Concerts played by a band, in insertion order.
    async fn concerts_for_band(&mut self, band_id: i32) -> Result<Vec<Concert>>;

    /// Distinct venues a band has played, ordered by venue id.
    async fn venues_for_band(&mut self, band_id: i32) -> Result<Vec<Venue>>;

    /// True iff the band's hometown equals the venue's city.
    async fn is_hometown_show(&mut self, concert_id: i32) -> Result<bool>;

    /// Stage greeting for the concert, see [`introduction`](crate::introduction).
    async fn concert_introduction(&mut self, concert_id: i32) -> Result<String>;

    /// Record a new concert and commit it.
    ///
    /// Band and venue ids are not checked up front; the schema's foreign keys
    /// reject unknown ids.
    async fn schedule_concert(
        &mut self,
        band_id: i32,
        venue_id: i32,
        concert_date: NaiveDate,
    ) -> Result<Concert>;

    /// One greeting per concert the band has played, in concert order.
    async fn all_introductions_for_band(&mut self, band_id: i32) -> Result<Vec<String>>;

    /// Band with the most concerts overall. Ties go to the lowest band id.
    async fn band_with_most_performances(&mut self) -> Result<Option<BandPerformances>>;

    /// First concert (lowest id) at the venue on that date.
    async fn concert_at_venue_on_date(
        &mut self,
        venue_id: i32,
        concert_date: NaiveDate,
    ) -> Result<Option<Concert>>;

    /// Band with the most concerts at one venue. Ties go to the lowest band id.
    async fn most_frequent_band_at_venue(
        &mut self,
        venue_id: i32,
    ) -> Result<Option<BandPerformances>>;

    /// Release the underlying connection.
    ///
    /// Dropping a store also releases it, without a graceful shutdown.
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}
