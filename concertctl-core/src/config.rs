//! Database connection settings
//!
//! Assembled once at startup and handed to the repository. `DB_NAME` and
//! `DB_USER` are required. `DB_PASSWORD` may be unset or empty for trust and
//! peer authentication. Host and port default to a local Postgres unless
//! `DB_HOST` / `DB_PORT` say otherwise.

use std::fmt;

use sqlx::postgres::PgConnectOptions;

use crate::error::{ConcertError, Result};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;

/// Immutable connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    host: String,
    port: u16,
    database: String,
    user: String,
    password: Option<String>,
}

impl DbConfig {
    pub fn new(database: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: database.into(),
            user: user.into(),
            password: None,
        }
    }

    /// Set the password. An empty string means no password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        let password = password.into();
        self.password = (!password.is_empty()).then_some(password);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// The environment in production; the CLI feeds its parsed `--db-*`
    /// flags through here so both paths share one set of rules.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConcertError::config(format!("{key} is not set")))
        };

        let mut config = Self::new(required("DB_NAME")?, required("DB_USER")?);

        if let Some(password) = lookup("DB_PASSWORD") {
            config = config.with_password(password);
        }
        if let Some(host) = lookup("DB_HOST").filter(|h| !h.is_empty()) {
            config.host = host;
        }
        if let Some(port) = lookup("DB_PORT").filter(|p| !p.is_empty()) {
            config.port = port
                .parse()
                .map_err(|_| ConcertError::config(format!("DB_PORT '{port}' is not a valid port")))?;
        }

        Ok(config)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Driver options for a single connection
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user);

        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
