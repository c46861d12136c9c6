//! Database connection arguments
//!
//! Every flag falls back to the matching `DB_*` environment variable (a
//! `.env` file is loaded before parsing). The parsed values then go through
//! [`DbConfig::from_lookup`], the same rules the library applies to the
//! environment.

use clap::Args;
use concertctl_core::config::{DEFAULT_HOST, DEFAULT_PORT};
use concertctl_core::{ConcertError, DbConfig};

#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Database name
    #[arg(long = "db-name", env = "DB_NAME", value_name = "NAME")]
    pub name: Option<String>,

    /// Database user
    #[arg(long = "db-user", env = "DB_USER", value_name = "USER")]
    pub user: Option<String>,

    /// Database password (omit for trust or peer authentication)
    #[arg(
        long = "db-password",
        env = "DB_PASSWORD",
        value_name = "PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    /// Database host
    #[arg(long = "db-host", env = "DB_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Database port
    #[arg(long = "db-port", env = "DB_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl DbArgs {
    pub fn into_config(self) -> Result<DbConfig, ConcertError> {
        let port = self.port.to_string();
        DbConfig::from_lookup(|key| match key {
            "DB_NAME" => self.name.clone(),
            "DB_USER" => self.user.clone(),
            "DB_PASSWORD" => self.password.clone(),
            "DB_HOST" => Some(self.host.clone()),
            "DB_PORT" => Some(port.clone()),
            _ => None,
        })
        .map_err(|err| match err {
            ConcertError::Config { reason } => {
                ConcertError::config(format!("{reason} (pass the matching --db-* flag)"))
            }
            other => other,
        })
    }
}
