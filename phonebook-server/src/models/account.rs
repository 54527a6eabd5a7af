use crate::store::Record;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SECURITY_QUESTION: &str = "What is your pet's name?";
pub const DEFAULT_ADMIN_ROLE: &str = "admin";

fn default_security_question() -> String {
    String::from(DEFAULT_SECURITY_QUESTION)
}

fn default_admin_role() -> String {
    String::from(DEFAULT_ADMIN_ROLE)
}

fn default_permissions() -> Vec<String> {
    vec![String::from("view_users"), String::from("view_statistics")]
}

fn active() -> u8 {
    1
}

/// A row of `users.json`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: u64,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default = "default_security_question")]
    pub security_question: String,
    #[serde(default)]
    pub security_answer_hash: String,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_reset_at: Option<NaiveDateTime>,
    #[serde(default = "active")]
    pub is_active: u8,
    #[serde(default)]
    pub contacts_file: String,
}

impl Record for UserAccount {
    fn id(&self) -> u64 {
        self.id
    }
}

/// What a user may see of their own account, hashes left out
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub phone: String,
    pub avatar: String,
    pub is_active: u8,
    pub created_at: NaiveDateTime,
}

impl From<&UserAccount> for UserProfile {
    fn from(account: &UserAccount) -> Self {
        UserProfile {
            id: account.id,
            username: account.username.clone(),
            fullname: account.fullname.clone(),
            email: account.email.clone(),
            phone: account.phone.clone(),
            avatar: account.avatar.clone(),
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub security_question: String,
    #[serde(default)]
    pub security_answer: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

/// A row of `admins.json`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default = "default_admin_role")]
    pub role: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub last_login: Option<NaiveDateTime>,
    #[serde(default = "default_permissions")]
    pub permissions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AdminProfile {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub created_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
    pub permissions: Vec<String>,
}

impl From<&AdminAccount> for AdminProfile {
    fn from(account: &AdminAccount) -> Self {
        AdminProfile {
            username: account.username.clone(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            role: account.role.clone(),
            created_at: account.created_at,
            last_login: account.last_login,
            permissions: account.permissions.clone(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewAdmin {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_admin_role")]
    pub role: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}

impl NewAdmin {
    pub fn new(username: &str, password: &str) -> Self {
        NewAdmin {
            username: username.to_string(),
            password: password.to_string(),
            role: default_admin_role(),
            email: String::new(),
            full_name: String::new(),
        }
    }

    pub(crate) fn permissions() -> Vec<String> {
        default_permissions()
    }
}
