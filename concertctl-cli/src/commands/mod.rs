//! Command implementations for concertctl CLI

pub mod demo;
pub mod query;

// Re-export dispatcher functions for flat access from main.rs
pub use demo::{run_demo, DemoArgs};
pub use query::{run_query, QueryCommand};
