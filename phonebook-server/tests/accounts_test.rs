use phonebook_server::accounts::{AdminAccounts, UserAccounts, UserDirectory};
use phonebook_server::contacts::ContactList;
use phonebook_server::errors::account_error::AccountError;
use phonebook_server::groups::GroupManager;
use phonebook_server::models::account::{NewAdmin, NewUser, ProfileUpdate};
use phonebook_server::models::contact::ContactInput;
use phonebook_server::models::group::GroupInput;
use phonebook_server::models::owner::{GroupScope, Owner};
use phonebook_server::store::DataLayout;
use tempfile::TempDir;

fn layout() -> (TempDir, DataLayout) {
    let dir = TempDir::new().unwrap();
    let layout = DataLayout::new(dir.path());
    layout.ensure().unwrap();
    (dir, layout)
}

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: String::from("hunter22"),
        security_question: String::from("First school?"),
        security_answer: String::from("Springfield"),
    }
}

#[test]
fn register_same_username_twice() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout.clone());

    let alice = accounts.register(&new_user("alice")).unwrap();
    assert_eq!(alice.id, 1);
    assert!(layout.contacts_file(&Owner::User(String::from("alice"))).exists());

    let error = accounts.register(&new_user("alice")).unwrap_err();
    assert!(matches!(error, AccountError::UsernameTaken));

    let bob = accounts.register(&new_user("bob")).unwrap();
    assert_eq!(bob.id, 2);
    assert_eq!(
        accounts.contacts_file("bob").unwrap(),
        layout.contacts_file(&Owner::User(String::from("bob")))
    );
}

#[test]
fn usernames_are_unique_ignoring_case() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout.clone());
    accounts.register(&new_user("alice")).unwrap();
    let owner = Owner::User(String::from("alice"));
    ContactList::new(&layout, &owner)
        .add(&ContactInput::new("Bob", "555-123-4567"))
        .unwrap();

    assert!(matches!(
        accounts.register(&new_user("Alice")).unwrap_err(),
        AccountError::UsernameTaken
    ));
    assert_eq!(ContactList::new(&layout, &owner).count().unwrap(), 1);

    let admins = AdminAccounts::new(layout);
    admins.register(&NewAdmin::new("root", "rootpass")).unwrap();
    assert!(matches!(
        admins.register(&NewAdmin::new("ROOT", "rootpass")).unwrap_err(),
        AccountError::UsernameTaken
    ));
}

#[test]
fn register_keeps_existing_contacts_file() {
    let (_dir, layout) = layout();
    let owner = Owner::User(String::from("alice"));
    ContactList::new(&layout, &owner)
        .add(&ContactInput::new("Bob", "555-123-4567"))
        .unwrap();

    UserAccounts::new(layout.clone())
        .register(&new_user("alice"))
        .unwrap();
    assert_eq!(ContactList::new(&layout, &owner).count().unwrap(), 1);
}

#[test]
fn register_validates_credentials() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout);

    let mut user = new_user("al");
    assert!(matches!(
        accounts.register(&user).unwrap_err(),
        AccountError::UsernameTooShort
    ));

    user.username = String::from("../etc");
    assert!(matches!(
        accounts.register(&user).unwrap_err(),
        AccountError::InvalidUsername
    ));

    user.username = String::from("alice");
    user.password = String::from("12345");
    assert!(matches!(
        accounts.register(&user).unwrap_err(),
        AccountError::PasswordTooShort
    ));
}

#[test]
fn passwords_are_not_stored_in_plain_text() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout.clone());
    accounts.register(&new_user("alice")).unwrap();

    let contents = std::fs::read_to_string(layout.users_file()).unwrap();
    assert!(!contents.contains("hunter22"));
    assert!(!contents.contains("Springfield"));
    assert!(contents.contains("alice_contacts.json"));
}

#[test]
fn login() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout);
    accounts.register(&new_user("alice")).unwrap();

    assert_eq!(accounts.login("alice", "hunter22").unwrap().username, "alice");
    assert!(matches!(
        accounts.login("alice", "hunter23").unwrap_err(),
        AccountError::WrongPassword
    ));
    assert!(matches!(
        accounts.login("mallory", "hunter22").unwrap_err(),
        AccountError::UnknownUser
    ));
    assert!(matches!(
        accounts.login("alice", "").unwrap_err(),
        AccountError::MissingFields
    ));
}

#[test]
fn default_security_question() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout);

    let mut user = new_user("alice");
    user.security_question = String::new();
    accounts.register(&user).unwrap();

    assert_eq!(
        accounts.security_question("alice").unwrap(),
        "What is your pet's name?"
    );
}

#[test]
fn reset_password_requires_security_answer() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout);
    accounts.register(&new_user("alice")).unwrap();

    assert_eq!(accounts.security_question("alice").unwrap(), "First school?");
    assert!(matches!(
        accounts
            .reset_password("alice", "Shelbyville", "newpass1")
            .unwrap_err(),
        AccountError::WrongSecurityAnswer
    ));
    assert!(accounts.login("alice", "hunter22").is_ok());

    // Answers ignore case and surrounding spaces
    accounts.verify_security_answer("alice", "  springfield ").unwrap();
    accounts
        .reset_password("alice", "SPRINGFIELD", "newpass1")
        .unwrap();

    assert!(accounts.login("alice", "hunter22").is_err());
    assert!(accounts.get("alice").unwrap().password_reset_at.is_some());
    accounts.login("alice", "newpass1").unwrap();
}

#[test]
fn change_password() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout);
    accounts.register(&new_user("alice")).unwrap();

    assert!(matches!(
        accounts
            .change_password("alice", "hunter22", "hunter22")
            .unwrap_err(),
        AccountError::SamePassword
    ));
    assert!(matches!(
        accounts
            .change_password("alice", "wrong-one", "newpass1")
            .unwrap_err(),
        AccountError::WrongPassword
    ));

    accounts
        .change_password("alice", "hunter22", "newpass1")
        .unwrap();
    accounts.login("alice", "newpass1").unwrap();
}

#[test]
fn update_profile() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout);
    accounts.register(&new_user("alice")).unwrap();

    let invalid = ProfileUpdate {
        email: Some(String::from("not an email")),
        ..Default::default()
    };
    assert!(matches!(
        accounts.update_profile("alice", &invalid).unwrap_err(),
        AccountError::InvalidEmail
    ));

    let update = ProfileUpdate {
        fullname: Some(String::from(" Alice Liddell ")),
        email: Some(String::from("alice@example.com")),
        ..Default::default()
    };
    let profile = accounts.update_profile("alice", &update).unwrap();
    assert_eq!(profile.fullname, "Alice Liddell");
    assert_eq!(profile.email, "alice@example.com");
    assert_eq!(profile.phone, "");

    let stored = accounts.profile("alice").unwrap();
    assert_eq!(stored, profile);
}

#[test]
fn admin_bootstrap_and_login() {
    let (_dir, layout) = layout();
    let admins = AdminAccounts::new(layout.clone());

    assert!(admins.ensure_bootstrap("root", "rootpass").unwrap());
    assert!(!admins.ensure_bootstrap("other", "otherpass").unwrap());
    assert!(admins.is_admin("root").unwrap());
    assert!(!admins.is_admin("other").unwrap());

    let admin = admins.login("root", "rootpass").unwrap();
    assert!(admin.last_login.is_some());
    assert_eq!(admin.role, "admin");
    assert!(matches!(
        admins.login("root", "wrongpass").unwrap_err(),
        AccountError::WrongPassword
    ));

    admins.register(&NewAdmin::new("second", "secondpass")).unwrap();
    assert!(matches!(
        admins
            .register(&NewAdmin::new("second", "secondpass"))
            .unwrap_err(),
        AccountError::UsernameTaken
    ));
    assert_eq!(admins.list().unwrap().len(), 2);
    assert!(layout.contacts_file(&Owner::Admin(String::from("second"))).exists());
}

#[test]
fn admin_and_user_namespaces_are_separate() {
    let (_dir, layout) = layout();
    UserAccounts::new(layout.clone())
        .register(&new_user("alice"))
        .unwrap();
    AdminAccounts::new(layout.clone())
        .register(&NewAdmin::new("alice", "adminpass"))
        .unwrap();

    let user = Owner::User(String::from("alice"));
    let admin = Owner::Admin(String::from("alice"));
    ContactList::new(&layout, &user)
        .add(&ContactInput::new("Bob", "555-123-4567"))
        .unwrap();

    assert_eq!(ContactList::new(&layout, &user).count().unwrap(), 1);
    assert_eq!(ContactList::new(&layout, &admin).count().unwrap(), 0);
}

#[test]
fn directory_lists_and_searches_users() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout.clone());
    for username in ["alice", "bob", "alicia"] {
        accounts.register(&new_user(username)).unwrap();
    }

    let mut contacts = ContactList::new(&layout, &Owner::User(String::from("alice")));
    contacts
        .add(&ContactInput::new("Bob", "555-123-4567"))
        .unwrap();
    contacts
        .add(&ContactInput::new("Carol", "555-765-4321"))
        .unwrap();

    let directory = UserDirectory::new(layout);
    assert_eq!(directory.list_users().unwrap().len(), 3);

    let found = directory.search_users("ALI").unwrap();
    let names: Vec<&str> = found
        .iter()
        .map(|user| user.profile.username.as_str())
        .collect();
    assert_eq!(names, ["alice", "alicia"]);

    assert_eq!(directory.get_user("alice").unwrap().contact_count, 2);
    assert!(matches!(
        directory.get_user("mallory").unwrap_err(),
        AccountError::UnknownUser
    ));

    let stats = directory.system_stats().unwrap();
    assert_eq!(stats.total_users, 3);
    assert_eq!(stats.total_contacts, 2);
    assert_eq!(stats.recent_registrations, 3);
    assert_eq!(stats.avg_contacts_per_user, 0.67);
}

#[test]
fn directory_deletes_user_and_files() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout.clone());
    accounts.register(&new_user("alice")).unwrap();
    accounts.register(&new_user("bob")).unwrap();

    let owner = Owner::User(String::from("alice"));
    let scope = GroupScope::User(String::from("alice"));
    GroupManager::new(&layout, scope.clone())
        .add(&GroupInput::named("Family"))
        .unwrap();
    assert!(layout.groups_file(&scope).exists());

    let directory = UserDirectory::new(layout.clone());
    directory.delete_user("alice").unwrap();

    assert!(!layout.contacts_file(&owner).exists());
    assert!(!layout.groups_file(&scope).exists());
    assert!(matches!(
        accounts.get("alice").unwrap_err(),
        AccountError::UnknownUser
    ));
    assert!(accounts.get("bob").is_ok());
    assert!(matches!(
        directory.delete_user("alice").unwrap_err(),
        AccountError::UnknownUser
    ));
}

#[test]
fn directory_deletes_user_when_a_file_cannot_be_removed() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout.clone());
    accounts.register(&new_user("alice")).unwrap();

    // A directory in place of the contacts file makes its removal fail
    let contacts_file = layout.contacts_file(&Owner::User(String::from("alice")));
    std::fs::remove_file(&contacts_file).unwrap();
    std::fs::create_dir(&contacts_file).unwrap();
    std::fs::write(contacts_file.join("keep"), "").unwrap();

    UserDirectory::new(layout).delete_user("alice").unwrap();
    assert!(matches!(
        accounts.get("alice").unwrap_err(),
        AccountError::UnknownUser
    ));
    assert!(contacts_file.exists());
}

#[test]
fn directory_protects_admin_username() {
    let (_dir, layout) = layout();
    UserAccounts::new(layout.clone())
        .register(&new_user("admin"))
        .unwrap();

    let directory = UserDirectory::new(layout);
    assert!(matches!(
        directory.delete_user("admin").unwrap_err(),
        AccountError::ProtectedAccount
    ));
    assert_eq!(directory.list_users().unwrap().len(), 1);
}

#[test]
fn directory_updates_password() {
    let (_dir, layout) = layout();
    let accounts = UserAccounts::new(layout.clone());
    accounts.register(&new_user("alice")).unwrap();

    let directory = UserDirectory::new(layout);
    assert!(matches!(
        directory.update_user_password("alice", "123").unwrap_err(),
        AccountError::PasswordTooShort
    ));
    directory.update_user_password("alice", "fromadmin").unwrap();

    accounts.login("alice", "fromadmin").unwrap();
}
