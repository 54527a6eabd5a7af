mod contact_list;
mod contact_manager;
mod fields;

pub use contact_list::ContactList;
pub use contact_manager::ContactManager;
pub use fields::{SearchField, SortField};
