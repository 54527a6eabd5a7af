//! Whole-file JSON persistence.
//!
//! Every collection is one JSON array on disk. Reads load the entire array,
//! writes replace the entire file. There are no partial updates and no locks:
//! two writers to the same file race and the last one wins.

mod json_file;
pub mod layout;

pub use json_file::{read_collection, remove_collection, write_collection};
pub use layout::DataLayout;

/// A record identified by an integer id unique within its file
pub trait Record {
    fn id(&self) -> u64;
}

/// Next id for a collection, one past the current maximum
pub fn next_id<T: Record>(records: &[T]) -> u64 {
    records.iter().map(Record::id).max().map_or(1, |max| max + 1)
}
