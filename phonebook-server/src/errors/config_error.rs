use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("SESSION_TTL_HOURS must be a positive number of hours, got {0:?}")]
    InvalidSessionTtl(String),
    #[error("ADMIN_USERNAME and ADMIN_PASSWORD must be set together")]
    IncompleteBootstrapAdmin,
}
