use crate::store::Record;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GROUP_COLOR: &str = "#EF4444";

fn default_color() -> String {
    String::from(DEFAULT_GROUP_COLOR)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub description: String,
    /// 1 when visible to every admin, 0 otherwise
    #[serde(default)]
    pub is_shared: u8,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Record for Group {
    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GroupInput {
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_shared: Option<u8>,
}

impl GroupInput {
    pub fn named(name: &str) -> Self {
        GroupInput {
            name: name.to_string(),
            ..Default::default()
        }
    }
}
