use super::sessions::Sessions;
use crate::accounts::AdminAccounts;
use crate::config::Config;
use crate::errors::account_error::AccountError;
use crate::store::DataLayout;
use chrono::Duration;

#[derive(Clone)]
pub struct AppState {
    pub layout: DataLayout,
    pub sessions: Sessions,
}

impl AppState {
    pub fn new(layout: DataLayout, session_ttl: Duration) -> Self {
        AppState {
            layout,
            sessions: Sessions::new(session_ttl),
        }
    }

    /// Creates the data directories and the configured first admin
    pub fn from_config(config: &Config) -> Result<Self, AccountError> {
        let layout = DataLayout::new(&config.data_dir);
        layout.ensure()?;

        if let Some(admin) = &config.bootstrap_admin {
            AdminAccounts::new(layout.clone()).ensure_bootstrap(&admin.username, &admin.password)?;
        }

        Ok(AppState::new(layout, config.session_ttl))
    }
}
