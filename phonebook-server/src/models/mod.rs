use chrono::{Local, NaiveDateTime};

pub mod account;
pub mod contact;
pub mod group;
pub mod owner;
pub mod sort_order;
pub mod statistics;
pub mod transient;

/// Local wall-clock time, the timestamp format of every stored record
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
