//! In-memory `ConcertStore` for tests
//!
//! Mirrors the Postgres repository's ordering, dedup, tie-breaking and
//! not-found behaviour. Concert ids are handed out sequentially like a
//! `SERIAL` column, and unknown band/venue ids are rejected the way the
//! schema's foreign keys would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{ConcertError, Result};
use crate::models::{introduction, Band, BandPerformances, Concert, Venue};
use crate::store::ConcertStore;

#[derive(Debug, Default, Clone)]
pub struct MemoryConcertStore {
    bands: Vec<Band>,
    venues: Vec<Venue>,
    concerts: Vec<Concert>,
    next_concert_id: i32,
    closed: Arc<AtomicBool>,
}

impl MemoryConcertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a band row.
    pub fn add_band(&mut self, id: i32, name: &str, hometown: &str) -> Band {
        let band = Band {
            id,
            name: name.to_string(),
            hometown: hometown.to_string(),
        };
        self.bands.push(band.clone());
        band
    }

    /// Seed a venue row.
    pub fn add_venue(&mut self, id: i32, title: &str, city: &str) -> Venue {
        let venue = Venue {
            id,
            title: title.to_string(),
            city: city.to_string(),
        };
        self.venues.push(venue.clone());
        venue
    }

    pub fn concerts(&self) -> &[Concert] {
        &self.concerts
    }

    /// Flag set once the store is closed. Clones share it, so it can be
    /// observed after `close` consumes the store.
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }

    fn band(&self, id: i32) -> Option<&Band> {
        self.bands.iter().find(|b| b.id == id)
    }

    fn venue(&self, id: i32) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id == id)
    }

    fn concert(&self, id: i32) -> Option<&Concert> {
        self.concerts.iter().find(|c| c.id == id)
    }

    /// Band and venue joined to a concert (inner-join semantics)
    fn linked(&self, concert_id: i32) -> Option<(&Band, &Venue)> {
        let concert = self.concert(concert_id)?;
        Some((self.band(concert.band_id)?, self.venue(concert.venue_id)?))
    }

    /// Concerts with a band row, grouped by band, highest count first and
    /// lowest band id on ties.
    fn top_band<'a>(&self, concerts: impl Iterator<Item = &'a Concert>) -> Option<BandPerformances> {
        let mut counts: Vec<(i32, i64)> = Vec::new();
        for concert in concerts {
            if self.band(concert.band_id).is_none() {
                continue;
            }
            match counts.iter_mut().find(|(id, _)| *id == concert.band_id) {
                Some((_, count)) => *count += 1,
                None => counts.push((concert.band_id, 1)),
            }
        }

        counts.sort_by(|(a_id, a_count), (b_id, b_count)| {
            b_count.cmp(a_count).then(a_id.cmp(b_id))
        });

        let (band_id, performance_count) = counts.first().copied()?;
        self.band(band_id).cloned().map(|band| BandPerformances {
            band,
            performance_count,
        })
    }
}

#[async_trait]
impl ConcertStore for MemoryConcertStore {
    async fn band_for_concert(&mut self, concert_id: i32) -> Result<Option<Band>> {
        Ok(self
            .concert(concert_id)
            .and_then(|c| self.band(c.band_id))
            .cloned())
    }

    async fn venue_for_concert(&mut self, concert_id: i32) -> Result<Option<Venue>> {
        Ok(self
            .concert(concert_id)
            .and_then(|c| self.venue(c.venue_id))
            .cloned())
    }

    async fn concerts_for_venue(&mut self, venue_id: i32) -> Result<Vec<Concert>> {
        Ok(self
            .concerts
            .iter()
            .filter(|c| c.venue_id == venue_id)
            .cloned()
            .collect())
    }

    async fn bands_for_venue(&mut self, venue_id: i32) -> Result<Vec<Band>> {
        let mut bands: Vec<Band> = self
            .bands
            .iter()
            .filter(|b| {
                self.concerts
                    .iter()
                    .any(|c| c.venue_id == venue_id && c.band_id == b.id)
            })
            .cloned()
            .collect();
        bands.sort_by_key(|b| b.id);
        bands.dedup_by_key(|b| b.id);
        Ok(bands)
    }

    async fn concerts_for_band(&mut self, band_id: i32) -> Result<Vec<Concert>> {
        Ok(self
            .concerts
            .iter()
            .filter(|c| c.band_id == band_id)
            .cloned()
            .collect())
    }

    async fn venues_for_band(&mut self, band_id: i32) -> Result<Vec<Venue>> {
        let mut venues: Vec<Venue> = self
            .venues
            .iter()
            .filter(|v| {
                self.concerts
                    .iter()
                    .any(|c| c.band_id == band_id && c.venue_id == v.id)
            })
            .cloned()
            .collect();
        venues.sort_by_key(|v| v.id);
        venues.dedup_by_key(|v| v.id);
        Ok(venues)
    }

    async fn is_hometown_show(&mut self, concert_id: i32) -> Result<bool> {
        self.linked(concert_id)
            .map(|(band, venue)| band.is_hometown_of(venue))
            .ok_or_else(|| ConcertError::concert_not_found(concert_id))
    }

    async fn concert_introduction(&mut self, concert_id: i32) -> Result<String> {
        self.linked(concert_id)
            .map(|(band, venue)| introduction(&venue.city, &band.name, &band.hometown))
            .ok_or_else(|| ConcertError::concert_not_found(concert_id))
    }

    async fn schedule_concert(
        &mut self,
        band_id: i32,
        venue_id: i32,
        concert_date: NaiveDate,
    ) -> Result<Concert> {
        if self.band(band_id).is_none() {
            return Err(ConcertError::ForeignKey {
                resource: "band",
                id: band_id,
            });
        }
        if self.venue(venue_id).is_none() {
            return Err(ConcertError::ForeignKey {
                resource: "venue",
                id: venue_id,
            });
        }

        self.next_concert_id += 1;
        let concert = Concert {
            id: self.next_concert_id,
            band_id,
            venue_id,
            concert_date,
        };
        self.concerts.push(concert.clone());
        Ok(concert)
    }

    async fn all_introductions_for_band(&mut self, band_id: i32) -> Result<Vec<String>> {
        Ok(self
            .concerts
            .iter()
            .filter(|c| c.band_id == band_id)
            .filter_map(|c| self.linked(c.id))
            .map(|(band, venue)| introduction(&venue.city, &band.name, &band.hometown))
            .collect())
    }

    async fn band_with_most_performances(&mut self) -> Result<Option<BandPerformances>> {
        Ok(self.top_band(self.concerts.iter()))
    }

    async fn concert_at_venue_on_date(
        &mut self,
        venue_id: i32,
        concert_date: NaiveDate,
    ) -> Result<Option<Concert>> {
        Ok(self
            .concerts
            .iter()
            .find(|c| c.venue_id == venue_id && c.concert_date == concert_date)
            .cloned())
    }

    async fn most_frequent_band_at_venue(
        &mut self,
        venue_id: i32,
    ) -> Result<Option<BandPerformances>> {
        Ok(self.top_band(self.concerts.iter().filter(|c| c.venue_id == venue_id)))
    }

    async fn close(self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
