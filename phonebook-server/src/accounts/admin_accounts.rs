use super::{hash_secret, validate_credentials, verify_secret};
use crate::errors::account_error::AccountError;
use crate::models::account::{AdminAccount, NewAdmin};
use crate::models::contact::Contact;
use crate::models::now;
use crate::models::owner::Owner;
use crate::store::{DataLayout, read_collection, write_collection};
use log::{info, trace};

pub struct AdminAccounts {
    layout: DataLayout,
}

impl AdminAccounts {
    pub fn new(layout: DataLayout) -> Self {
        AdminAccounts { layout }
    }

    fn load(&self) -> Result<Vec<AdminAccount>, AccountError> {
        Ok(read_collection(&self.layout.admins_file())?)
    }

    fn save(&self, admins: &[AdminAccount]) -> Result<(), AccountError> {
        Ok(write_collection(&self.layout.admins_file(), admins)?)
    }

    pub fn register(&self, new_admin: &NewAdmin) -> Result<AdminAccount, AccountError> {
        validate_credentials(&new_admin.username, &new_admin.password)?;

        let mut admins = self.load()?;
        if admins
            .iter()
            .any(|admin| admin.username.eq_ignore_ascii_case(&new_admin.username))
        {
            return Err(AccountError::UsernameTaken);
        }

        let admin = AdminAccount {
            username: new_admin.username.clone(),
            password: hash_secret(&new_admin.password)?,
            email: new_admin.email.trim().to_string(),
            full_name: new_admin.full_name.trim().to_string(),
            role: new_admin.role.clone(),
            created_at: now(),
            last_login: None,
            permissions: NewAdmin::permissions(),
        };

        admins.push(admin.clone());
        self.save(&admins)?;

        let contacts_file = self
            .layout
            .contacts_file(&Owner::Admin(admin.username.clone()));
        if !contacts_file.exists() {
            write_collection::<Contact>(&contacts_file, &[])?;
        }

        info!("Admin {} registered", admin.username);
        Ok(admin)
    }

    /// Verifies the password and records the login time
    pub fn login(&self, username: &str, password: &str) -> Result<AdminAccount, AccountError> {
        if username.is_empty() || password.is_empty() {
            return Err(AccountError::MissingFields);
        }

        let mut admins = self.load()?;
        let admin = admins
            .iter_mut()
            .find(|admin| admin.username == username)
            .ok_or(AccountError::UnknownUser)?;

        if !verify_secret(password, &admin.password) {
            return Err(AccountError::WrongPassword);
        }

        admin.last_login = Some(now());
        let admin = admin.clone();
        self.save(&admins)?;

        trace!("Admin {username} logged in");
        Ok(admin)
    }

    pub fn get(&self, username: &str) -> Result<AdminAccount, AccountError> {
        self.load()?
            .into_iter()
            .find(|admin| admin.username == username)
            .ok_or(AccountError::UnknownUser)
    }

    pub fn list(&self) -> Result<Vec<AdminAccount>, AccountError> {
        self.load()
    }

    pub fn is_admin(&self, username: &str) -> Result<bool, AccountError> {
        Ok(self.load()?.iter().any(|admin| admin.username == username))
    }

    /// Registers the configured admin when there is no admin yet
    pub fn ensure_bootstrap(&self, username: &str, password: &str) -> Result<bool, AccountError> {
        if !self.load()?.is_empty() {
            return Ok(false);
        }

        self.register(&NewAdmin::new(username, password))?;
        info!("Created initial admin account {username}");
        Ok(true)
    }
}
