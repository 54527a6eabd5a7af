//! User and admin accounts.
//!
//! Both account kinds share the credential rules and the argon2 hashing
//! below; each manager reads its whole accounts file, scans it linearly and
//! rewrites it on mutation.

use crate::errors::account_error::AccountError;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use regex::Regex;
use std::sync::LazyLock;

mod admin_accounts;
mod user_accounts;
mod user_directory;

pub use admin_accounts::AdminAccounts;
pub use user_accounts::UserAccounts;
pub use user_directory::UserDirectory;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

// Usernames end up in file names
static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-][A-Za-z0-9_.\-]*$").expect("valid regex"));

pub fn validate_username(username: &str) -> Result<(), AccountError> {
    if username.is_empty() {
        return Err(AccountError::MissingFields);
    }

    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(AccountError::UsernameTooShort);
    }

    if !USERNAME.is_match(username) {
        return Err(AccountError::InvalidUsername);
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AccountError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AccountError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_credentials(username: &str, password: &str) -> Result<(), AccountError> {
    if username.is_empty() || password.is_empty() {
        return Err(AccountError::MissingFields);
    }

    validate_username(username)?;
    validate_password(password)
}

pub(crate) fn hash_secret(secret: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .or(Err(AccountError::Hashing))
}

/// False for a wrong secret and for a hash that does not parse
pub(crate) fn verify_secret(secret: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Security answers are compared trimmed and lowercased
pub(crate) fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}
