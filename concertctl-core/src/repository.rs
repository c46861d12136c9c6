//! PostgreSQL concert repository
//!
//! Owns the process's single connection. Every call is one parameterized
//! statement; `schedule_concert` runs outside an explicit transaction so it
//! is committed as soon as it returns.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Connection, PgConnection};
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::connection::connect;
use crate::error::{ConcertError, Result};
use crate::models::{introduction, Band, BandPerformances, Concert, Venue};
use crate::store::ConcertStore;

/// Concert repository backed by one Postgres connection
pub struct PgConcertRepository {
    conn: PgConnection,
}

impl PgConcertRepository {
    /// Wrap an already-open connection.
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }

    /// Open the connection described by `config`.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        Ok(Self::new(connect(config).await?))
    }

    /// Borrow the underlying connection (for fixtures and ad-hoc queries).
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }

    async fn greeting_parts(&mut self, concert_id: i32) -> Result<Option<(String, String, String)>> {
        let parts: Option<(String, String, String)> = sqlx::query_as(
            r#"
            SELECT v.city, b.name, b.hometown
            FROM concerts c
            JOIN bands b ON c.band_id = b.id
            JOIN venues v ON c.venue_id = v.id
            WHERE c.id = $1
            "#,
        )
        .bind(concert_id)
        .fetch_optional(&mut self.conn)
        .await?;

        Ok(parts)
    }
}

#[async_trait]
impl ConcertStore for PgConcertRepository {
    async fn band_for_concert(&mut self, concert_id: i32) -> Result<Option<Band>> {
        debug!(concert_id, "band_for_concert");
        let band = sqlx::query_as::<_, Band>(
            r#"
            SELECT b.id, b.name, b.hometown
            FROM bands b
            JOIN concerts c ON b.id = c.band_id
            WHERE c.id = $1
            "#,
        )
        .bind(concert_id)
        .fetch_optional(&mut self.conn)
        .await?;

        Ok(band)
    }

    async fn venue_for_concert(&mut self, concert_id: i32) -> Result<Option<Venue>> {
        debug!(concert_id, "venue_for_concert");
        let venue = sqlx::query_as::<_, Venue>(
            r#"
            SELECT v.id, v.title, v.city
            FROM venues v
            JOIN concerts c ON v.id = c.venue_id
            WHERE c.id = $1
            "#,
        )
        .bind(concert_id)
        .fetch_optional(&mut self.conn)
        .await?;

        Ok(venue)
    }

    async fn concerts_for_venue(&mut self, venue_id: i32) -> Result<Vec<Concert>> {
        debug!(venue_id, "concerts_for_venue");
        let concerts = sqlx::query_as::<_, Concert>(
            r#"
            SELECT id, band_id, venue_id, concert_date
            FROM concerts
            WHERE venue_id = $1
            ORDER BY id
            "#,
        )
        .bind(venue_id)
        .fetch_all(&mut self.conn)
        .await?;

        Ok(concerts)
    }

    async fn bands_for_venue(&mut self, venue_id: i32) -> Result<Vec<Band>> {
        debug!(venue_id, "bands_for_venue");
        let bands = sqlx::query_as::<_, Band>(
            r#"
            SELECT DISTINCT b.id, b.name, b.hometown
            FROM bands b
            JOIN concerts c ON b.id = c.band_id
            WHERE c.venue_id = $1
            ORDER BY b.id
            "#,
        )
        .bind(venue_id)
        .fetch_all(&mut self.conn)
        .await?;

        Ok(bands)
    }

    async fn concerts_for_band(&mut self, band_id: i32) -> Result<Vec<Concert>> {
        debug!(band_id, "concerts_for_band");
        let concerts = sqlx::query_as::<_, Concert>(
            r#"
            SELECT id, band_id, venue_id, concert_date
            FROM concerts
            WHERE band_id = $1
            ORDER BY id
            "#,
        )
        .bind(band_id)
        .fetch_all(&mut self.conn)
        .await?;

        Ok(concerts)
    }

    async fn venues_for_band(&mut self, band_id: i32) -> Result<Vec<Venue>> {
        debug!(band_id, "venues_for_band");
        let venues = sqlx::query_as::<_, Venue>(
            r#"
            SELECT DISTINCT v.id, v.title, v.city
            FROM venues v
            JOIN concerts c ON v.id = c.venue_id
            WHERE c.band_id = $1
            ORDER BY v.id
            "#,
        )
        .bind(band_id)
        .fetch_all(&mut self.conn)
        .await?;

        Ok(venues)
    }

    async fn is_hometown_show(&mut self, concert_id: i32) -> Result<bool> {
        debug!(concert_id, "is_hometown_show");
        let row: Option<(bool,)> = sqlx::query_as(
            r#"
            SELECT COALESCE(b.hometown = v.city, FALSE) AS hometown_show
            FROM concerts c
            JOIN bands b ON c.band_id = b.id
            JOIN venues v ON c.venue_id = v.id
            WHERE c.id = $1
            "#,
        )
        .bind(concert_id)
        .fetch_optional(&mut self.conn)
        .await?;

        row.map(|(hometown_show,)| hometown_show)
            .ok_or_else(|| ConcertError::concert_not_found(concert_id))
    }

    async fn concert_introduction(&mut self, concert_id: i32) -> Result<String> {
        debug!(concert_id, "concert_introduction");
        let (city, name, hometown) = self
            .greeting_parts(concert_id)
            .await?
            .ok_or_else(|| ConcertError::concert_not_found(concert_id))?;

        Ok(introduction(&city, &name, &hometown))
    }

    async fn schedule_concert(
        &mut self,
        band_id: i32,
        venue_id: i32,
        concert_date: NaiveDate,
    ) -> Result<Concert> {
        let concert = sqlx::query_as::<_, Concert>(
            r#"
            INSERT INTO concerts (band_id, venue_id, concert_date)
            VALUES ($1, $2, $3)
            RETURNING id, band_id, venue_id, concert_date
            "#,
        )
        .bind(band_id)
        .bind(venue_id)
        .bind(concert_date)
        .fetch_one(&mut self.conn)
        .await?;

        info!(concert_id = concert.id, band_id, venue_id, %concert_date, "scheduled concert");
        Ok(concert)
    }

    async fn all_introductions_for_band(&mut self, band_id: i32) -> Result<Vec<String>> {
        debug!(band_id, "all_introductions_for_band");
        let rows: Vec<(String, String, String)> = sqlx::query_as(
            r#"
            SELECT v.city, b.name, b.hometown
            FROM concerts c
            JOIN bands b ON c.band_id = b.id
            JOIN venues v ON c.venue_id = v.id
            WHERE c.band_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(band_id)
        .fetch_all(&mut self.conn)
        .await?;

        Ok(rows
            .iter()
            .map(|(city, name, hometown)| introduction(city, name, hometown))
            .collect())
    }

    async fn band_with_most_performances(&mut self) -> Result<Option<BandPerformances>> {
        debug!("band_with_most_performances");
        let top = sqlx::query_as::<_, BandPerformances>(
            r#"
            SELECT b.id, b.name, b.hometown, COUNT(c.id) AS performance_count
            FROM bands b
            JOIN concerts c ON b.id = c.band_id
            GROUP BY b.id, b.name, b.hometown
            ORDER BY performance_count DESC, b.id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&mut self.conn)
        .await?;

        Ok(top)
    }

    async fn concert_at_venue_on_date(
        &mut self,
        venue_id: i32,
        concert_date: NaiveDate,
    ) -> Result<Option<Concert>> {
        debug!(venue_id, %concert_date, "concert_at_venue_on_date");
        let concert = sqlx::query_as::<_, Concert>(
            r#"
            SELECT id, band_id, venue_id, concert_date
            FROM concerts
            WHERE venue_id = $1 AND concert_date = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(venue_id)
        .bind(concert_date)
        .fetch_optional(&mut self.conn)
        .await?;

        Ok(concert)
    }

    async fn most_frequent_band_at_venue(
        &mut self,
        venue_id: i32,
    ) -> Result<Option<BandPerformances>> {
        debug!(venue_id, "most_frequent_band_at_venue");
        let top = sqlx::query_as::<_, BandPerformances>(
            r#"
            SELECT b.id, b.name, b.hometown, COUNT(c.id) AS performance_count
            FROM bands b
            JOIN concerts c ON b.id = c.band_id
            WHERE c.venue_id = $1
            GROUP BY b.id, b.name, b.hometown
            ORDER BY performance_count DESC, b.id ASC
            LIMIT 1
            "#,
        )
        .bind(venue_id)
        .fetch_optional(&mut self.conn)
        .await?;

        Ok(top)
    }

    /// Sends the Postgres terminate message before dropping the socket.
    async fn close(self) -> Result<()> {
        self.conn.close().await?;
        info!("Database connection closed");
        Ok(())
    }
}
