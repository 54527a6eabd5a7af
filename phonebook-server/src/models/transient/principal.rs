use crate::models::owner::Owner;
use chrono::NaiveDateTime;

/// The session a request was authenticated with
#[derive(Clone, Debug)]
pub struct Principal {
    pub token: String,
    pub owner: Owner,
    pub valid_until: NaiveDateTime,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.owner.is_admin()
    }
}
