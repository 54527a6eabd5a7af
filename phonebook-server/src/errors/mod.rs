pub mod account_error;
pub mod config_error;
pub mod contact_error;
pub mod group_error;
pub mod store_error;
