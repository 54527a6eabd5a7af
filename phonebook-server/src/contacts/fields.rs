use crate::models::contact::{Contact, phone_digits};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Phone,
    Email,
    Address,
    Group,
    Notes,
}

impl SearchField {
    pub const ALL: &[SearchField] = &[
        SearchField::Name,
        SearchField::Phone,
        SearchField::Email,
        SearchField::Address,
        SearchField::Group,
        SearchField::Notes,
    ];

    pub fn value(self, contact: &Contact) -> &str {
        match self {
            SearchField::Name => &contact.name,
            SearchField::Phone => &contact.phone,
            SearchField::Email => &contact.email,
            SearchField::Address => &contact.address,
            SearchField::Group => &contact.group,
            SearchField::Notes => &contact.notes,
        }
    }

    /// Parses a comma separated list, skipping unknown names
    pub fn parse_list(list: &str) -> Vec<SearchField> {
        list.split(',')
            .filter_map(|name| name.parse().ok())
            .collect()
    }
}

impl FromStr for SearchField {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "name" => Ok(SearchField::Name),
            "phone" => Ok(SearchField::Phone),
            "email" => Ok(SearchField::Email),
            "address" => Ok(SearchField::Address),
            "group" => Ok(SearchField::Group),
            "notes" => Ok(SearchField::Notes),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Name,
    Phone,
    Email,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Unknown fields sort by name
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "phone" => SortField::Phone,
            "email" => SortField::Email,
            "created_at" => SortField::CreatedAt,
            "updated_at" => SortField::UpdatedAt,
            _ => SortField::Name,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Phone => "phone",
            SortField::Email => "email",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    pub fn compare(self, a: &Contact, b: &Contact) -> Ordering {
        match self {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Phone => compare_numeric(&phone_digits(&a.phone), &phone_digits(&b.phone)),
            SortField::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

/// Compares digit strings by numeric value without overflowing on long numbers.
/// An empty string is zero.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
