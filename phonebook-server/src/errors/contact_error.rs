use crate::errors::store_error::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Field {0} is required")]
    MissingField(&'static str),
    #[error("Invalid phone number (minimum 9 digits)")]
    InvalidPhone,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Phone number already exists in contact list")]
    DuplicatePhone,
    #[error("Contact not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}
