//! One subcommand per repository operation
//!
//! Commands: band-for-concert, venue-for-concert, concerts-for-venue,
//! bands-for-venue, concerts-for-band, venues-for-band, hometown-show,
//! introduction, schedule, introductions-for-band, top-band,
//! concert-on-date, top-band-at-venue

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use concertctl_core::ConcertStore;
use serde_json::json;

use crate::output::{self, OutputFormat};

#[derive(Args, Debug, Clone, Copy)]
pub struct ConcertArg {
    /// Concert ID
    pub concert_id: i32,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct BandArg {
    /// Band ID
    pub band_id: i32,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct VenueArg {
    /// Venue ID
    pub venue_id: i32,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct ScheduleArgs {
    /// Band playing the concert
    #[arg(long = "band", value_name = "BAND_ID")]
    pub band_id: i32,

    /// Venue hosting the concert
    #[arg(long = "venue", value_name = "VENUE_ID")]
    pub venue_id: i32,

    /// Concert date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct ConcertOnDateArgs {
    /// Venue to look up
    #[arg(long = "venue", value_name = "VENUE_ID")]
    pub venue_id: i32,

    /// Concert date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,
}

#[derive(Subcommand, Debug, Clone)]
pub enum QueryCommand {
    /// Show the band playing a concert
    BandForConcert(ConcertArg),
    /// Show the venue hosting a concert
    VenueForConcert(ConcertArg),
    /// List concerts held at a venue
    ConcertsForVenue(VenueArg),
    /// List the distinct bands that played a venue
    BandsForVenue(VenueArg),
    /// List concerts played by a band
    ConcertsForBand(BandArg),
    /// List the distinct venues a band has played
    VenuesForBand(BandArg),
    /// Check whether a concert is in the band's hometown
    HometownShow(ConcertArg),
    /// Print the band's stage greeting for a concert
    Introduction(ConcertArg),
    /// Record a new concert
    Schedule(ScheduleArgs),
    /// Print the stage greeting for every concert a band has played
    IntroductionsForBand(BandArg),
    /// Show the band with the most concerts overall
    TopBand,
    /// Find the concert at a venue on a given date
    ConcertOnDate(ConcertOnDateArgs),
    /// Show the band with the most concerts at a venue
    TopBandAtVenue(VenueArg),
}

pub async fn run_query<S, W>(
    store: &mut S,
    command: QueryCommand,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    S: ConcertStore + ?Sized,
    W: Write,
{
    match command {
        QueryCommand::BandForConcert(ConcertArg { concert_id }) => {
            let band = store.band_for_concert(concert_id).await?;
            output::optional(
                out,
                format,
                band.as_ref(),
                &format!("No band found for concert ID: {concert_id}"),
            )
        }
        QueryCommand::VenueForConcert(ConcertArg { concert_id }) => {
            let venue = store.venue_for_concert(concert_id).await?;
            output::optional(
                out,
                format,
                venue.as_ref(),
                &format!("No venue found for concert ID: {concert_id}"),
            )
        }
        QueryCommand::ConcertsForVenue(VenueArg { venue_id }) => {
            let concerts = store.concerts_for_venue(venue_id).await?;
            output::list(out, format, &concerts, &format!("No concerts at venue ID: {venue_id}"))
        }
        QueryCommand::BandsForVenue(VenueArg { venue_id }) => {
            let bands = store.bands_for_venue(venue_id).await?;
            output::list(out, format, &bands, &format!("No bands have played venue ID: {venue_id}"))
        }
        QueryCommand::ConcertsForBand(BandArg { band_id }) => {
            let concerts = store.concerts_for_band(band_id).await?;
            output::list(out, format, &concerts, &format!("No concerts for band ID: {band_id}"))
        }
        QueryCommand::VenuesForBand(BandArg { band_id }) => {
            let venues = store.venues_for_band(band_id).await?;
            output::list(out, format, &venues, &format!("Band ID {band_id} has not played any venue"))
        }
        QueryCommand::HometownShow(ConcertArg { concert_id }) => {
            let hometown_show = store.is_hometown_show(concert_id).await?;
            let text = if hometown_show {
                format!("Concert {concert_id} is a hometown show")
            } else {
                format!("Concert {concert_id} is not a hometown show")
            };
            output::record(
                out,
                format,
                json!({ "concert_id": concert_id, "hometown_show": hometown_show }),
                &text,
            )
        }
        QueryCommand::Introduction(ConcertArg { concert_id }) => {
            let introduction = store.concert_introduction(concert_id).await?;
            output::record(
                out,
                format,
                json!({ "concert_id": concert_id, "introduction": introduction }),
                &introduction,
            )
        }
        QueryCommand::Schedule(args) => {
            let concert = store
                .schedule_concert(args.band_id, args.venue_id, args.date)
                .await?;
            output::value(out, format, &concert)
        }
        QueryCommand::IntroductionsForBand(BandArg { band_id }) => {
            let introductions = store.all_introductions_for_band(band_id).await?;
            output::list(
                out,
                format,
                &introductions,
                &format!("No concerts for band ID: {band_id}"),
            )
        }
        QueryCommand::TopBand => {
            let top = store.band_with_most_performances().await?;
            output::optional(out, format, top.as_ref(), "No concerts recorded")
        }
        QueryCommand::ConcertOnDate(args) => {
            let concert = store
                .concert_at_venue_on_date(args.venue_id, args.date)
                .await?;
            output::optional(
                out,
                format,
                concert.as_ref(),
                &format!("No concert at venue ID {} on {}", args.venue_id, args.date),
            )
        }
        QueryCommand::TopBandAtVenue(VenueArg { venue_id }) => {
            let top = store.most_frequent_band_at_venue(venue_id).await?;
            output::optional(
                out,
                format,
                top.as_ref(),
                &format!("No concerts at venue ID: {venue_id}"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concertctl_core::{ConcertError, MemoryConcertStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> MemoryConcertStore {
        let mut store = MemoryConcertStore::new();
        store.add_band(1, "The Beatles", "Liverpool");
        store.add_band(2, "Wire", "London");
        store.add_venue(1, "Cavern Club", "Liverpool");
        store.add_venue(2, "Roundhouse", "London");
        store
    }

    async fn run(store: &mut MemoryConcertStore, command: QueryCommand, format: OutputFormat) -> String {
        let mut out = Vec::new();
        run_query(store, command, format, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn schedule_then_look_up() {
        let mut store = store();
        let scheduled = run(
            &mut store,
            QueryCommand::Schedule(ScheduleArgs {
                band_id: 1,
                venue_id: 2,
                date: date(1963, 3, 1),
            }),
            OutputFormat::Text,
        )
        .await;
        assert_eq!(scheduled, "#1 band 1 @ venue 2 on 1963-03-01\n");

        let band = run(
            &mut store,
            QueryCommand::BandForConcert(ConcertArg { concert_id: 1 }),
            OutputFormat::Text,
        )
        .await;
        assert_eq!(band, "#1 The Beatles (Liverpool)\n");
    }

    #[tokio::test]
    async fn missing_band_prints_message() {
        let mut store = store();
        let out = run(
            &mut store,
            QueryCommand::BandForConcert(ConcertArg { concert_id: 7 }),
            OutputFormat::Text,
        )
        .await;
        assert_eq!(out, "No band found for concert ID: 7\n");
    }

    #[tokio::test]
    async fn hometown_show_json() {
        let mut store = store();
        store.schedule_concert(2, 2, date(1977, 4, 1)).await.unwrap();

        let out = run(
            &mut store,
            QueryCommand::HometownShow(ConcertArg { concert_id: 1 }),
            OutputFormat::Json,
        )
        .await;
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["hometown_show"], true);
        assert_eq!(parsed["concert_id"], 1);
    }

    #[tokio::test]
    async fn introduction_for_missing_concert_is_not_found() {
        let mut store = store();
        let mut out = Vec::new();
        let err = run_query(
            &mut store,
            QueryCommand::Introduction(ConcertArg { concert_id: 3 }),
            OutputFormat::Text,
            &mut out,
        )
        .await
        .unwrap_err();

        let concert_err = err.downcast_ref::<ConcertError>().unwrap();
        assert!(concert_err.is_not_found());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn top_band_text() {
        let mut store = store();
        store.schedule_concert(1, 1, date(1962, 1, 1)).await.unwrap();
        store.schedule_concert(2, 1, date(1962, 1, 2)).await.unwrap();
        store.schedule_concert(2, 2, date(1962, 1, 3)).await.unwrap();

        let out = run(&mut store, QueryCommand::TopBand, OutputFormat::Text).await;
        assert_eq!(out, "#2 Wire (London) - 2 performances\n");

        let out = run(
            &mut store,
            QueryCommand::TopBandAtVenue(VenueArg { venue_id: 1 }),
            OutputFormat::Text,
        )
        .await;
        assert_eq!(out, "#1 The Beatles (Liverpool) - 1 performance\n");
    }

    #[tokio::test]
    async fn introductions_for_band_lists_each_concert() {
        let mut store = store();
        store.schedule_concert(2, 1, date(1977, 1, 1)).await.unwrap();
        store.schedule_concert(2, 2, date(1977, 1, 2)).await.unwrap();

        let out = run(
            &mut store,
            QueryCommand::IntroductionsForBand(BandArg { band_id: 2 }),
            OutputFormat::Text,
        )
        .await;
        assert_eq!(
            out,
            "Hello Liverpool!!!!! We are Wire and we're from London\n\
             Hello London!!!!! We are Wire and we're from London\n"
        );
    }

    #[tokio::test]
    async fn concert_on_date_absent_json_is_null() {
        let mut store = store();
        let out = run(
            &mut store,
            QueryCommand::ConcertOnDate(ConcertOnDateArgs {
                venue_id: 1,
                date: date(2001, 1, 1),
            }),
            OutputFormat::Json,
        )
        .await;
        assert_eq!(out, "null\n");
    }
}
