//! concertctl-core: data access over bands, venues, and concerts
//!
//! The [`ConcertStore`] trait is the query surface. [`PgConcertRepository`]
//! implements it over a single PostgreSQL connection; enable the `testkit`
//! feature for an in-memory implementation.

pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;

#[cfg(any(test, feature = "testkit"))]
pub mod memory;

pub use config::DbConfig;
pub use connection::connect;
pub use error::{ConcertError, Result};
pub use models::{introduction, Band, BandPerformances, Concert, Venue};
pub use repository::PgConcertRepository;
pub use store::ConcertStore;

#[cfg(any(test, feature = "testkit"))]
pub use memory::MemoryConcertStore;
