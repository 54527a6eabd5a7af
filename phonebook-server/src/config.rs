use crate::errors::config_error::ConfigError;
use chrono::Duration;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "Data";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Credentials of the admin created on first start
#[derive(Clone, Debug)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub bind_addr: String,
    pub frontend_url: Option<String>,
    pub session_ttl: Duration,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Config {
    /// Reads `PHONEBOOK_DATA_DIR`, `PHONEBOOK_BIND`, `FRONTEND_URL`,
    /// `SESSION_TTL_HOURS`, `ADMIN_USERNAME` and `ADMIN_PASSWORD`
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source, `from_env` passes the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("PHONEBOOK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let bind_addr =
            lookup("PHONEBOOK_BIND").unwrap_or_else(|| String::from(DEFAULT_BIND_ADDR));

        let frontend_url = lookup("FRONTEND_URL").filter(|url| !url.trim().is_empty());

        let session_ttl = match lookup("SESSION_TTL_HOURS") {
            Some(hours) => match hours.trim().parse::<i64>() {
                Ok(parsed) if parsed > 0 => Duration::hours(parsed),
                _ => return Err(ConfigError::InvalidSessionTtl(hours)),
            },
            None => Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        };

        let bootstrap_admin = match (lookup("ADMIN_USERNAME"), lookup("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some(BootstrapAdmin { username, password }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteBootstrapAdmin),
        };

        Ok(Config {
            data_dir,
            bind_addr,
            frontend_url,
            session_ttl,
            bootstrap_admin,
        })
    }
}
