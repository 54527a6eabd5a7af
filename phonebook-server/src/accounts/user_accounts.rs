use super::{
    hash_secret, normalize_answer, validate_credentials, validate_password, verify_secret,
};
use crate::errors::account_error::AccountError;
use crate::models::account::{
    DEFAULT_SECURITY_QUESTION, NewUser, ProfileUpdate, UserAccount, UserProfile,
};
use crate::models::contact::Contact;
use crate::models::now;
use crate::models::owner::Owner;
use crate::store::{DataLayout, next_id, read_collection, write_collection};
use email_address::EmailAddress;
use log::{info, trace};
use std::path::PathBuf;

pub struct UserAccounts {
    layout: DataLayout,
}

impl UserAccounts {
    pub fn new(layout: DataLayout) -> Self {
        UserAccounts { layout }
    }

    fn load(&self) -> Result<Vec<UserAccount>, AccountError> {
        Ok(read_collection(&self.layout.users_file())?)
    }

    fn save(&self, users: &[UserAccount]) -> Result<(), AccountError> {
        Ok(write_collection(&self.layout.users_file(), users)?)
    }

    /// Creates the account and an empty contacts file when there is none yet.
    /// Usernames are unique ignoring ASCII case.
    pub fn register(&self, new_user: &NewUser) -> Result<UserAccount, AccountError> {
        validate_credentials(&new_user.username, &new_user.password)?;

        let mut users = self.load()?;
        if users
            .iter()
            .any(|user| user.username.eq_ignore_ascii_case(&new_user.username))
        {
            return Err(AccountError::UsernameTaken);
        }

        let security_question = match new_user.security_question.trim() {
            "" => String::from(DEFAULT_SECURITY_QUESTION),
            question => question.to_string(),
        };

        let account = UserAccount {
            id: next_id(&users),
            username: new_user.username.clone(),
            password: hash_secret(&new_user.password)?,
            fullname: String::new(),
            email: String::new(),
            phone: String::new(),
            avatar: String::new(),
            security_question,
            security_answer_hash: hash_secret(&normalize_answer(&new_user.security_answer))?,
            created_at: now(),
            updated_at: None,
            password_reset_at: None,
            is_active: 1,
            contacts_file: DataLayout::contacts_file_name(&new_user.username),
        };

        users.push(account.clone());
        self.save(&users)?;

        let contacts_file = self
            .layout
            .contacts_file(&Owner::User(account.username.clone()));
        if !contacts_file.exists() {
            write_collection::<Contact>(&contacts_file, &[])?;
        }

        info!("{} registered", account.username);
        Ok(account)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<UserAccount, AccountError> {
        if username.is_empty() || password.is_empty() {
            return Err(AccountError::MissingFields);
        }

        let user = self.get(username)?;
        if !verify_secret(password, &user.password) {
            return Err(AccountError::WrongPassword);
        }

        trace!("{username} logged in");
        Ok(user)
    }

    pub fn get(&self, username: &str) -> Result<UserAccount, AccountError> {
        self.load()?
            .into_iter()
            .find(|user| user.username == username)
            .ok_or(AccountError::UnknownUser)
    }

    pub fn security_question(&self, username: &str) -> Result<String, AccountError> {
        Ok(self.get(username)?.security_question)
    }

    pub fn verify_security_answer(&self, username: &str, answer: &str) -> Result<(), AccountError> {
        if username.is_empty() || answer.trim().is_empty() {
            return Err(AccountError::MissingFields);
        }

        let user = self.get(username)?;
        if verify_secret(&normalize_answer(answer), &user.security_answer_hash) {
            Ok(())
        } else {
            Err(AccountError::WrongSecurityAnswer)
        }
    }

    pub fn reset_password(
        &self,
        username: &str,
        security_answer: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        if username.is_empty() || security_answer.trim().is_empty() || new_password.is_empty() {
            return Err(AccountError::MissingFields);
        }
        validate_password(new_password)?;

        let mut users = self.load()?;
        let user = users
            .iter_mut()
            .find(|user| user.username == username)
            .ok_or(AccountError::UnknownUser)?;

        if !verify_secret(&normalize_answer(security_answer), &user.security_answer_hash) {
            return Err(AccountError::WrongSecurityAnswer);
        }

        user.password = hash_secret(new_password)?;
        user.password_reset_at = Some(now());
        self.save(&users)?;

        info!("{username} reset their password");
        Ok(())
    }

    pub fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        validate_password(new_password)?;
        if current_password == new_password {
            return Err(AccountError::SamePassword);
        }

        let mut users = self.load()?;
        let user = users
            .iter_mut()
            .find(|user| user.username == username)
            .ok_or(AccountError::UnknownUser)?;

        if !verify_secret(current_password, &user.password) {
            return Err(AccountError::WrongPassword);
        }

        user.password = hash_secret(new_password)?;
        user.updated_at = Some(now());
        self.save(&users)
    }

    pub fn contacts_file(&self, username: &str) -> Result<PathBuf, AccountError> {
        let user = self.get(username)?;
        Ok(self.layout.contacts_file(&Owner::User(user.username)))
    }

    pub fn profile(&self, username: &str) -> Result<UserProfile, AccountError> {
        Ok(UserProfile::from(&self.get(username)?))
    }

    /// Only the full name, email, phone and avatar can be changed
    pub fn update_profile(
        &self,
        username: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, AccountError> {
        if let Some(email) = &update.email {
            let email = email.trim();
            if !email.is_empty() && !EmailAddress::is_valid(email) {
                return Err(AccountError::InvalidEmail);
            }
        }

        let mut users = self.load()?;
        let user = users
            .iter_mut()
            .find(|user| user.username == username)
            .ok_or(AccountError::UnknownUser)?;

        if let Some(fullname) = &update.fullname {
            user.fullname = fullname.trim().to_string();
        }
        if let Some(email) = &update.email {
            user.email = email.trim().to_string();
        }
        if let Some(phone) = &update.phone {
            user.phone = phone.trim().to_string();
        }
        if let Some(avatar) = &update.avatar {
            user.avatar = avatar.clone();
        }
        user.updated_at = Some(now());

        let profile = UserProfile::from(&*user);
        self.save(&users)?;
        Ok(profile)
    }
}
