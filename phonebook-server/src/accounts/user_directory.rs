use super::{hash_secret, validate_password};
use crate::errors::account_error::AccountError;
use crate::models::account::{UserAccount, UserProfile};
use crate::models::contact::Contact;
use crate::models::now;
use crate::models::owner::{GroupScope, Owner};
use crate::models::statistics::{SystemStats, UserSummary};
use crate::store::{DataLayout, read_collection, remove_collection, write_collection};
use chrono::Duration;
use log::{info, warn};

/// The reserved account name that can never be deleted
pub const PROTECTED_USERNAME: &str = "admin";

const RECENT_REGISTRATION_DAYS: i64 = 7;

/// Admin-side view over every user account
pub struct UserDirectory {
    layout: DataLayout,
}

impl UserDirectory {
    pub fn new(layout: DataLayout) -> Self {
        UserDirectory { layout }
    }

    fn load(&self) -> Result<Vec<UserAccount>, AccountError> {
        Ok(read_collection(&self.layout.users_file())?)
    }

    fn save(&self, users: &[UserAccount]) -> Result<(), AccountError> {
        Ok(write_collection(&self.layout.users_file(), users)?)
    }

    /// An unreadable contacts file counts as empty so one user can't break the listing
    fn count_contacts(&self, username: &str) -> usize {
        let path = self
            .layout
            .contacts_file(&Owner::User(username.to_string()));

        match read_collection::<Contact>(&path) {
            Ok(contacts) => contacts.len(),
            Err(error) => {
                warn!("Could not count contacts of {username}: {error}");
                0
            }
        }
    }

    fn summarize(&self, user: &UserAccount) -> UserSummary {
        UserSummary {
            profile: UserProfile::from(user),
            contact_count: self.count_contacts(&user.username),
        }
    }

    pub fn list_users(&self) -> Result<Vec<UserSummary>, AccountError> {
        Ok(self
            .load()?
            .iter()
            .map(|user| self.summarize(user))
            .collect())
    }

    pub fn get_user(&self, username: &str) -> Result<UserSummary, AccountError> {
        self.load()?
            .iter()
            .find(|user| user.username == username)
            .map(|user| self.summarize(user))
            .ok_or(AccountError::UnknownUser)
    }

    /// Case-insensitive substring match on usernames, an empty query lists everyone
    pub fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, AccountError> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.list_users();
        }

        Ok(self
            .load()?
            .iter()
            .filter(|user| user.username.to_lowercase().contains(&query))
            .map(|user| self.summarize(user))
            .collect())
    }

    /// Removes the account, then its contacts and groups files
    pub fn delete_user(&self, username: &str) -> Result<(), AccountError> {
        if username == PROTECTED_USERNAME {
            return Err(AccountError::ProtectedAccount);
        }

        let mut users = self.load()?;
        let count = users.len();
        users.retain(|user| user.username != username);
        if users.len() == count {
            return Err(AccountError::UnknownUser);
        }

        self.save(&users)?;

        let files = [
            self.layout.contacts_file(&Owner::User(username.to_string())),
            self.layout.groups_file(&GroupScope::User(username.to_string())),
        ];
        for file in files {
            if let Err(error) = remove_collection(&file) {
                warn!("Deleted user {username} but kept a data file: {error}");
            }
        }

        info!("Deleted user {username}");
        Ok(())
    }

    pub fn update_user_password(
        &self,
        username: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        validate_password(new_password)?;

        let mut users = self.load()?;
        let user = users
            .iter_mut()
            .find(|user| user.username == username)
            .ok_or(AccountError::UnknownUser)?;

        user.password = hash_secret(new_password)?;
        user.password_reset_at = Some(now());
        self.save(&users)?;

        info!("Password of {username} changed by an admin");
        Ok(())
    }

    pub fn system_stats(&self) -> Result<SystemStats, AccountError> {
        let users = self.load()?;
        let total_users = users.len();
        let total_contacts: usize = users
            .iter()
            .map(|user| self.count_contacts(&user.username))
            .sum();

        let since = now() - Duration::days(RECENT_REGISTRATION_DAYS);
        let recent_registrations = users.iter().filter(|user| user.created_at >= since).count();

        let avg_contacts_per_user = if total_users > 0 {
            (total_contacts as f64 / total_users as f64 * 100.0).round() / 100.0
        } else {
            0.0
        };

        Ok(SystemStats {
            total_users,
            total_contacts,
            recent_registrations,
            avg_contacts_per_user,
        })
    }
}
