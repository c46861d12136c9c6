//! Demo command - band, venue and greeting for one concert
//!
//! This is what `concertctl` runs when no subcommand is given.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use concertctl_core::ConcertStore;
use serde_json::json;

use crate::output::OutputFormat;

pub const DEFAULT_CONCERT_ID: i32 = 1;

#[derive(Args, Debug, Clone, Copy)]
pub struct DemoArgs {
    /// Concert to describe
    #[arg(long, default_value_t = DEFAULT_CONCERT_ID)]
    pub concert_id: i32,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            concert_id: DEFAULT_CONCERT_ID,
        }
    }
}

pub async fn run_demo<S, W>(store: &mut S, args: DemoArgs, format: OutputFormat, out: &mut W) -> Result<()>
where
    S: ConcertStore + ?Sized,
    W: Write,
{
    let concert_id = args.concert_id;
    let band = store.band_for_concert(concert_id).await?;
    let venue = store.venue_for_concert(concert_id).await?;
    let introduction = match store.concert_introduction(concert_id).await {
        Ok(introduction) => Some(introduction),
        Err(err) if err.is_not_found() => None,
        Err(err) => return Err(err.into()),
    };

    if format == OutputFormat::Json {
        let report = json!({
            "concert_id": concert_id,
            "band": band,
            "venue": venue,
            "introduction": introduction,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    match &band {
        Some(band) => writeln!(out, "Band: {band}")?,
        None => writeln!(out, "No band found for concert ID: {concert_id}")?,
    }
    match &venue {
        Some(venue) => writeln!(out, "Venue: {venue}")?,
        None => writeln!(out, "No venue found for concert ID: {concert_id}")?,
    }
    match &introduction {
        Some(introduction) => writeln!(out, "Introduction: {introduction}")?,
        None => writeln!(out, "No introduction for concert ID: {concert_id}")?,
    }

    Ok(())
}
