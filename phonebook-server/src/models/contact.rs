use crate::store::Record;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u64,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub phone_normalized: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    /// Name of a group, empty when the contact has none
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub avatar: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Record for Contact {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Keeps only the ASCII digits of a phone number
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Body of add and full update requests
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactInput {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub group: String,
    pub notes: String,
    pub avatar: Option<String>,
}

impl ContactInput {
    pub fn new(name: &str, phone: &str) -> Self {
        ContactInput {
            name: name.to_string(),
            phone: phone.to_string(),
            ..Default::default()
        }
    }

    pub fn in_group(mut self, group: &str) -> Self {
        self.group = group.to_string();
        self
    }
}

/// Body of partial update requests, absent fields are left alone
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub group: Option<String>,
    pub notes: Option<String>,
    pub avatar: Option<String>,
}
