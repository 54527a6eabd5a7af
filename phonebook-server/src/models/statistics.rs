use crate::models::account::UserProfile;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContactStatistics {
    pub total_contacts: usize,
    pub total_groups: usize,
    pub groups: Vec<String>,
    pub has_email: usize,
    pub has_address: usize,
    pub has_notes: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupStatistics {
    pub total_groups: usize,
    pub has_description: usize,
    pub colors_used: usize,
    pub group_names: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SystemStats {
    pub total_users: usize,
    pub total_contacts: usize,
    pub recent_registrations: usize,
    pub avg_contacts_per_user: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserSummary {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub contact_count: usize,
}
