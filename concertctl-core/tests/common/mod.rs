//! Backend-agnostic checks shared by the memory and Postgres test suites
//!
//! Each check expects a store seeded with [`BANDS`] and [`VENUES`] and no
//! concerts.

#![allow(dead_code)]

use chrono::NaiveDate;
use concertctl_core::{ConcertError, ConcertStore};

pub const BEATLES: i32 = 1;
pub const WIRE: i32 = 2;
pub const PIXIES: i32 = 3;
pub const UNBOOKED: i32 = 4;

pub const CAVERN: i32 = 1;
pub const ROUNDHOUSE: i32 = 2;
pub const PARADISE: i32 = 3;

pub const MISSING: i32 = 999;

/// (id, name, hometown)
pub const BANDS: [(i32, &str, &str); 4] = [
    (BEATLES, "The Beatles", "Liverpool"),
    (WIRE, "Wire", "London"),
    (PIXIES, "Pixies", "Boston"),
    (UNBOOKED, "Nobody Yet", "Nowhere"),
];

/// (id, title, city)
pub const VENUES: [(i32, &str, &str); 3] = [
    (CAVERN, "Cavern Club", "Liverpool"),
    (ROUNDHOUSE, "Roundhouse", "London"),
    (PARADISE, "Paradise Rock Club", "Boston"),
];

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn scheduled_concert_links_band_and_venue<S: ConcertStore>(store: &mut S) {
    let concert = store
        .schedule_concert(BEATLES, ROUNDHOUSE, date(1963, 3, 1))
        .await
        .unwrap();

    assert_eq!(concert.band_id, BEATLES);
    assert_eq!(concert.venue_id, ROUNDHOUSE);
    assert_eq!(concert.concert_date, date(1963, 3, 1));

    let band = store.band_for_concert(concert.id).await.unwrap().unwrap();
    assert_eq!(band.id, BEATLES);
    assert_eq!(band.name, "The Beatles");

    let venue = store.venue_for_concert(concert.id).await.unwrap().unwrap();
    assert_eq!(venue.id, ROUNDHOUSE);
    assert_eq!(venue.city, "London");
}

pub async fn missing_concert_lookups_are_absent<S: ConcertStore>(store: &mut S) {
    assert!(store.band_for_concert(MISSING).await.unwrap().is_none());
    assert!(store.venue_for_concert(MISSING).await.unwrap().is_none());
    assert!(store.concerts_for_venue(CAVERN).await.unwrap().is_empty());
    assert!(store.bands_for_venue(CAVERN).await.unwrap().is_empty());
    assert!(store.concerts_for_band(BEATLES).await.unwrap().is_empty());
    assert!(store.venues_for_band(BEATLES).await.unwrap().is_empty());
    assert!(store.band_with_most_performances().await.unwrap().is_none());
}

pub async fn band_history_is_complete_and_deduplicated<S: ConcertStore>(store: &mut S) {
    let first = store.schedule_concert(WIRE, ROUNDHOUSE, date(1977, 4, 1)).await.unwrap();
    let second = store.schedule_concert(WIRE, CAVERN, date(1977, 5, 1)).await.unwrap();
    let third = store.schedule_concert(WIRE, ROUNDHOUSE, date(1977, 6, 1)).await.unwrap();
    store.schedule_concert(PIXIES, ROUNDHOUSE, date(1988, 6, 1)).await.unwrap();

    let concerts = store.concerts_for_band(WIRE).await.unwrap();
    let ids: Vec<i32> = concerts.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
    assert!(concerts.iter().all(|c| c.band_id == WIRE));

    let venues = store.venues_for_band(WIRE).await.unwrap();
    let venue_ids: Vec<i32> = venues.iter().map(|v| v.id).collect();
    assert_eq!(venue_ids, vec![CAVERN, ROUNDHOUSE]);
}

pub async fn venue_history_is_complete_and_deduplicated<S: ConcertStore>(store: &mut S) {
    let a = store.schedule_concert(PIXIES, PARADISE, date(1987, 1, 1)).await.unwrap();
    let b = store.schedule_concert(WIRE, PARADISE, date(1987, 2, 1)).await.unwrap();
    let c = store.schedule_concert(PIXIES, PARADISE, date(1987, 3, 1)).await.unwrap();
    store.schedule_concert(PIXIES, CAVERN, date(1987, 4, 1)).await.unwrap();

    let concerts = store.concerts_for_venue(PARADISE).await.unwrap();
    let ids: Vec<i32> = concerts.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);

    let bands = store.bands_for_venue(PARADISE).await.unwrap();
    let band_ids: Vec<i32> = bands.iter().map(|b| b.id).collect();
    assert_eq!(band_ids, vec![WIRE, PIXIES]);
}

pub async fn hometown_show_compares_hometown_and_city<S: ConcertStore>(store: &mut S) {
    let home = store.schedule_concert(BEATLES, CAVERN, date(1961, 2, 9)).await.unwrap();
    let away = store.schedule_concert(BEATLES, PARADISE, date(1964, 9, 12)).await.unwrap();

    assert!(store.is_hometown_show(home.id).await.unwrap());
    assert!(!store.is_hometown_show(away.id).await.unwrap());

    let err = store.is_hometown_show(MISSING).await.unwrap_err();
    assert!(matches!(err, ConcertError::NotFound { resource: "concert", .. }));
}

pub async fn introduction_uses_venue_city_and_band<S: ConcertStore>(store: &mut S) {
    let concert = store.schedule_concert(PIXIES, ROUNDHOUSE, date(1989, 5, 1)).await.unwrap();

    assert_eq!(
        store.concert_introduction(concert.id).await.unwrap(),
        "Hello London!!!!! We are Pixies and we're from Boston"
    );

    let err = store.concert_introduction(MISSING).await.unwrap_err();
    assert!(err.is_not_found());
}

pub async fn introductions_follow_concert_order<S: ConcertStore>(store: &mut S) {
    store.schedule_concert(WIRE, PARADISE, date(1979, 1, 1)).await.unwrap();
    store.schedule_concert(PIXIES, CAVERN, date(1979, 1, 2)).await.unwrap();
    store.schedule_concert(WIRE, CAVERN, date(1979, 1, 3)).await.unwrap();

    assert_eq!(
        store.all_introductions_for_band(WIRE).await.unwrap(),
        vec![
            "Hello Boston!!!!! We are Wire and we're from London".to_string(),
            "Hello Liverpool!!!!! We are Wire and we're from London".to_string(),
        ]
    );
    assert!(store.all_introductions_for_band(UNBOOKED).await.unwrap().is_empty());
}

pub async fn most_performances_picks_highest_count<S: ConcertStore>(store: &mut S) {
    // Beatles: 3, Wire: 5, Pixies: 1
    for day in 1..=3 {
        store.schedule_concert(BEATLES, CAVERN, date(1962, 1, day)).await.unwrap();
    }
    for day in 1..=5 {
        store.schedule_concert(WIRE, ROUNDHOUSE, date(1978, 1, day)).await.unwrap();
    }
    store.schedule_concert(PIXIES, PARADISE, date(1988, 1, 1)).await.unwrap();

    let top = store.band_with_most_performances().await.unwrap().unwrap();
    assert_eq!(top.band.id, WIRE);
    assert_eq!(top.performance_count, 5);
}

pub async fn most_performances_ties_go_to_lowest_band_id<S: ConcertStore>(store: &mut S) {
    store.schedule_concert(PIXIES, PARADISE, date(1988, 1, 1)).await.unwrap();
    store.schedule_concert(WIRE, PARADISE, date(1988, 1, 2)).await.unwrap();
    store.schedule_concert(PIXIES, PARADISE, date(1988, 1, 3)).await.unwrap();
    store.schedule_concert(WIRE, CAVERN, date(1988, 1, 4)).await.unwrap();

    let top = store.band_with_most_performances().await.unwrap().unwrap();
    assert_eq!(top.band.id, WIRE);
    assert_eq!(top.performance_count, 2);

    // Only Paradise: Pixies 2, Wire 1
    let at_paradise = store.most_frequent_band_at_venue(PARADISE).await.unwrap().unwrap();
    assert_eq!(at_paradise.band.id, PIXIES);
    assert_eq!(at_paradise.performance_count, 2);

    // Cavern: Wire only
    let at_cavern = store.most_frequent_band_at_venue(CAVERN).await.unwrap().unwrap();
    assert_eq!(at_cavern.band.id, WIRE);

    assert!(store.most_frequent_band_at_venue(ROUNDHOUSE).await.unwrap().is_none());
}

pub async fn concert_on_date_finds_first_match<S: ConcertStore>(store: &mut S) {
    let gig_day = date(1990, 7, 4);
    assert!(store.concert_at_venue_on_date(ROUNDHOUSE, gig_day).await.unwrap().is_none());

    let first = store.schedule_concert(PIXIES, ROUNDHOUSE, gig_day).await.unwrap();
    // Same venue and date twice is allowed; the earliest booking wins
    store.schedule_concert(WIRE, ROUNDHOUSE, gig_day).await.unwrap();
    store.schedule_concert(WIRE, CAVERN, gig_day).await.unwrap();

    let found = store.concert_at_venue_on_date(ROUNDHOUSE, gig_day).await.unwrap().unwrap();
    assert_eq!(found, first);

    assert!(store
        .concert_at_venue_on_date(ROUNDHOUSE, date(1990, 7, 5))
        .await
        .unwrap()
        .is_none());
    assert!(store.concert_at_venue_on_date(PARADISE, gig_day).await.unwrap().is_none());
}
