use phonebook_server::contacts::ContactList;
use phonebook_server::errors::group_error::GroupError;
use phonebook_server::groups::{GroupManager, GroupSortField};
use phonebook_server::models::contact::ContactInput;
use phonebook_server::models::group::{DEFAULT_GROUP_COLOR, GroupInput};
use phonebook_server::models::owner::{GroupScope, Owner};
use phonebook_server::models::sort_order::SortOrder;
use phonebook_server::store::DataLayout;
use tempfile::TempDir;

fn user_groups() -> (TempDir, DataLayout, GroupManager) {
    let dir = TempDir::new().unwrap();
    let layout = DataLayout::new(dir.path());
    let manager = GroupManager::new(&layout, GroupScope::User(String::from("alice")));
    (dir, layout, manager)
}

#[test]
fn add_applies_defaults() {
    let (_dir, layout, mut groups) = user_groups();

    let family = groups.add(&GroupInput::named(" Family ")).unwrap();
    assert_eq!(family.id, 1);
    assert_eq!(family.name, "Family");
    assert_eq!(family.color, DEFAULT_GROUP_COLOR);
    assert_eq!(family.is_shared, 0);

    let input = GroupInput {
        name: String::from("Work"),
        color: Some(String::from("#3B82F6")),
        description: Some(String::from("Colleagues")),
        is_shared: None,
    };
    let work = groups.add(&input).unwrap();
    assert_eq!(work.id, 2);
    assert_eq!(work.color, "#3B82F6");

    let mut shared = GroupManager::new(&layout, GroupScope::Shared);
    assert_eq!(shared.add(&GroupInput::named("VIP")).unwrap().is_shared, 1);
    assert_eq!(shared.count().unwrap(), 1);
    assert_eq!(groups.count().unwrap(), 2);
}

#[test]
fn names_are_validated() {
    let (_dir, _layout, mut groups) = user_groups();

    assert!(matches!(
        groups.add(&GroupInput::named("  ")).unwrap_err(),
        GroupError::MissingName
    ));
    assert!(matches!(
        groups.add(&GroupInput::named("A")).unwrap_err(),
        GroupError::NameTooShort
    ));
    assert!(matches!(
        groups.add(&GroupInput::named(&"x".repeat(51))).unwrap_err(),
        GroupError::NameTooLong
    ));
    groups.add(&GroupInput::named(&"x".repeat(50))).unwrap();
}

#[test]
fn duplicate_names_are_rejected() {
    let (_dir, _layout, mut groups) = user_groups();
    groups.add(&GroupInput::named("Family")).unwrap();
    let work = groups.add(&GroupInput::named("Work")).unwrap();

    assert!(matches!(
        groups.add(&GroupInput::named("FAMILY")).unwrap_err(),
        GroupError::DuplicateName
    ));
    assert!(matches!(
        groups
            .update(work.id, &GroupInput::named("family"))
            .unwrap_err(),
        GroupError::DuplicateName
    ));

    // Renaming a group to itself in another case is allowed
    assert_eq!(
        groups
            .update(work.id, &GroupInput::named("WORK"))
            .unwrap()
            .name,
        "WORK"
    );
}

#[test]
fn update_of_missing_group_is_not_found() {
    let (_dir, _layout, mut groups) = user_groups();
    groups.add(&GroupInput::named("Family")).unwrap();

    assert!(matches!(
        groups.update(99, &GroupInput::named("Family")).unwrap_err(),
        GroupError::NotFound
    ));
}

#[test]
fn shared_flag_is_zero_or_one() {
    let (_dir, _layout, mut groups) = user_groups();
    let shared = |is_shared| GroupInput {
        is_shared: Some(is_shared),
        ..GroupInput::named("Work")
    };

    assert!(matches!(
        groups.add(&shared(7)).unwrap_err(),
        GroupError::InvalidShared
    ));
    let work = groups.add(&shared(1)).unwrap();
    assert_eq!(work.is_shared, 1);

    assert!(matches!(
        groups.update(work.id, &shared(2)).unwrap_err(),
        GroupError::InvalidShared
    ));
    assert_eq!(groups.update(work.id, &shared(0)).unwrap().is_shared, 0);
}

#[test]
fn update_keeps_omitted_fields() {
    let (_dir, _layout, mut groups) = user_groups();
    let input = GroupInput {
        name: String::from("Work"),
        color: Some(String::from("#3B82F6")),
        description: Some(String::from("Colleagues")),
        is_shared: None,
    };
    let work = groups.add(&input).unwrap();

    let updated = groups
        .update(work.id, &GroupInput::named("Office"))
        .unwrap();
    assert_eq!(updated.name, "Office");
    assert_eq!(updated.color, "#3B82F6");
    assert_eq!(updated.description, "Colleagues");
    assert_eq!(updated.created_at, work.created_at);
    assert_eq!(groups.get(work.id).unwrap(), updated);

    assert!(matches!(
        groups.update(9, &GroupInput::named("Nothing")).unwrap_err(),
        GroupError::NotFound
    ));
}

#[test]
fn delete_leaves_contacts_group_names() {
    let (_dir, layout, mut groups) = user_groups();
    let family = groups.add(&GroupInput::named("Family")).unwrap();
    groups.add(&GroupInput::named("Work")).unwrap();

    let mut contacts = ContactList::new(&layout, &Owner::User(String::from("alice")));
    contacts
        .add(&ContactInput::new("Bob", "555-123-4567").in_group("Family"))
        .unwrap();

    assert_eq!(groups.delete(family.id).unwrap().name, "Family");
    assert_eq!(groups.names().unwrap(), ["Work"]);
    assert!(matches!(
        groups.delete(family.id).unwrap_err(),
        GroupError::NotFound
    ));

    assert_eq!(contacts.get(1).unwrap().group, "Family");
    assert_eq!(contacts.filter_by_group("family").unwrap().len(), 1);
}

#[test]
fn search_sort_and_statistics() {
    let (_dir, _layout, mut groups) = user_groups();
    for (name, color, description) in [
        ("Work", "#3B82F6", "Office people"),
        ("family", "#EF4444", ""),
        ("Band", "#3B82F6", "Rehearsals on friday"),
    ] {
        let input = GroupInput {
            name: name.to_string(),
            color: Some(color.to_string()),
            description: Some(description.to_string()),
            is_shared: None,
        };
        groups.add(&input).unwrap();
    }

    let found: Vec<String> = groups
        .search("FRI")
        .unwrap()
        .into_iter()
        .map(|group| group.name)
        .collect();
    assert_eq!(found, ["Band"]);
    assert_eq!(groups.get_by_name("FAMILY").unwrap().id, 2);

    let sorted: Vec<String> = groups
        .sort(GroupSortField::from_name("name"), SortOrder::Ascending)
        .unwrap()
        .into_iter()
        .map(|group| group.name)
        .collect();
    assert_eq!(sorted, ["Band", "family", "Work"]);

    let stats = groups.statistics().unwrap();
    assert_eq!(stats.total_groups, 3);
    assert_eq!(stats.has_description, 2);
    assert_eq!(stats.colors_used, 2);
    assert_eq!(stats.group_names, ["Work", "family", "Band"]);

    assert_eq!(groups.delete_all().unwrap(), 3);
    assert_eq!(groups.count().unwrap(), 0);
}

#[test]
fn reload_picks_up_other_writers() {
    let (_dir, layout, mut groups) = user_groups();
    groups.add(&GroupInput::named("Family")).unwrap();
    assert_eq!(groups.count().unwrap(), 1);

    GroupManager::new(&layout, GroupScope::User(String::from("alice")))
        .add(&GroupInput::named("Work"))
        .unwrap();

    assert_eq!(groups.get_all().unwrap().len(), 1);
    assert_eq!(groups.reload().unwrap().count().unwrap(), 2);
}
