use crate::errors::store_error::StoreError;
use crate::models::owner::{GroupScope, Owner};
use std::fs;
use std::path::PathBuf;

/// Where every collection lives under the data directory:
///
/// ```text
/// User/user_account/users.json
/// User/user_data/<username>_contacts.json
/// User/user_data/<username>_groups.json
/// Admin/admin_account/admins.json
/// Admin/admin_data/<username>_contacts.json
/// Admin/admin_data/groups.json
/// ```
#[derive(Clone, Debug)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DataLayout { root: root.into() }
    }

    /// Creates the account and data directories
    pub fn ensure(&self) -> Result<(), StoreError> {
        for directory in [
            self.user_account_dir(),
            self.user_data_dir(),
            self.admin_account_dir(),
            self.admin_data_dir(),
        ] {
            fs::create_dir_all(&directory).map_err(|source| StoreError::Write {
                path: directory.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn users_file(&self) -> PathBuf {
        self.user_account_dir().join("users.json")
    }

    pub fn admins_file(&self) -> PathBuf {
        self.admin_account_dir().join("admins.json")
    }

    pub fn contacts_file_name(username: &str) -> String {
        format!("{username}_contacts.json")
    }

    pub fn contacts_file(&self, owner: &Owner) -> PathBuf {
        match owner {
            Owner::User(username) => self
                .user_data_dir()
                .join(Self::contacts_file_name(username)),
            Owner::Admin(username) => self
                .admin_data_dir()
                .join(Self::contacts_file_name(username)),
        }
    }

    pub fn groups_file(&self, scope: &GroupScope) -> PathBuf {
        match scope {
            GroupScope::User(username) => {
                self.user_data_dir().join(format!("{username}_groups.json"))
            }
            GroupScope::Shared => self.admin_data_dir().join("groups.json"),
        }
    }

    fn user_account_dir(&self) -> PathBuf {
        self.root.join("User").join("user_account")
    }

    fn user_data_dir(&self) -> PathBuf {
        self.root.join("User").join("user_data")
    }

    fn admin_account_dir(&self) -> PathBuf {
        self.root.join("Admin").join("admin_account")
    }

    fn admin_data_dir(&self) -> PathBuf {
        self.root.join("Admin").join("admin_data")
    }
}
