//! Single database connection management
//!
//! One connection per process, no pool. Opening it is attempted exactly once;
//! a failure is reported as [`ConcertError::Connection`] so callers can exit
//! with a distinct status.

use sqlx::{Connection, PgConnection};
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::error::{ConcertError, Result};

/// Open a PostgreSQL connection.
///
/// # Errors
///
/// Returns [`ConcertError::Connection`] if the server cannot be reached or
/// rejects the credentials.
///
/// # Example
///
/// ```ignore
/// let config = DbConfig::from_env()?;
/// let conn = connect(&config).await?;
/// ```
pub async fn connect(config: &DbConfig) -> Result<PgConnection> {
    debug!(host = %config.host(), port = config.port(), database = %config.database(), "connecting");

    let conn = PgConnection::connect_with(&config.connect_options())
        .await
        .map_err(ConcertError::connection)?;

    info!(database = %config.database(), "Database connection successful");
    Ok(conn)
}
