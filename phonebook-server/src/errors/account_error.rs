use crate::errors::store_error::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Please enter all required information")]
    MissingFields,
    #[error("Username must be at least 3 characters")]
    UsernameTooShort,
    #[error("Username may only contain letters, digits, '_', '-' and '.'")]
    InvalidUsername,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Username does not exist")]
    UnknownUser,
    #[error("Incorrect password")]
    WrongPassword,
    #[error("Incorrect security answer")]
    WrongSecurityAnswer,
    #[error("New password can't be the same as the current password")]
    SamePassword,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Cannot delete admin account")]
    ProtectedAccount,
    #[error("Could not hash secret")]
    Hashing,
    #[error(transparent)]
    Store(#[from] StoreError),
}
