//! Phone book server: user and admin accounts, per-owner contact lists and
//! contact groups, stored as JSON files and served over HTTP.

pub mod accounts;
pub mod config;
pub mod contacts;
pub mod errors;
pub mod groups;
pub mod http;
pub mod models;
pub mod store;
