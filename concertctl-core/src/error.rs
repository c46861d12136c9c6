/// Structured error types for concertctl-core.
///
/// Library consumers get a `thiserror` enum they can match on; the
/// `concertctl` binary wraps it in `anyhow` and downcasts to pick an exit code.
use thiserror::Error;

pub use sqlx::Error as SqlxError;

/// Exit code reported when the startup connection cannot be established.
pub const EXIT_CONNECTION_FAILURE: u8 = 3;

/// Exit code for every other failure.
pub const EXIT_FAILURE: u8 = 1;

/// Main error type for concert repository operations
#[derive(Error, Debug)]
pub enum ConcertError {
    /// The single startup connection could not be opened
    #[error("could not connect to database: {source}")]
    Connection { source: sqlx::Error },

    /// A query or command failed after the connection was established
    #[error("database query failed: {source}")]
    Query {
        #[from]
        source: sqlx::Error,
    },

    /// A derived value was requested for a concert with no linked rows
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A referenced row does not exist (in-memory counterpart of a FK violation)
    #[error("{resource} '{id}' does not exist")]
    ForeignKey { resource: &'static str, id: i32 },

    /// Missing or invalid configuration
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for concertctl-core operations
pub type Result<T> = std::result::Result<T, ConcertError>;

impl ConcertError {
    /// Wrap a driver error raised while opening the connection
    pub fn connection(source: sqlx::Error) -> Self {
        Self::Connection { source }
    }

    /// Create a not-found error for a concert id
    pub fn concert_not_found(concert_id: i32) -> Self {
        Self::NotFound {
            resource: "concert",
            id: concert_id.to_string(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Process exit code for this error.
    ///
    /// Connection failures get their own code so scripts can tell an
    /// unreachable database apart from a failed query.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Connection { .. } => EXIT_CONNECTION_FAILURE,
            _ => EXIT_FAILURE,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
