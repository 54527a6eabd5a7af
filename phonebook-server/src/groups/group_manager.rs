use crate::errors::group_error::GroupError;
use crate::models::group::{DEFAULT_GROUP_COLOR, Group, GroupInput};
use crate::models::now;
use crate::models::owner::GroupScope;
use crate::models::sort_order::SortOrder;
use crate::models::statistics::GroupStatistics;
use crate::store::{DataLayout, next_id, read_collection, write_collection};
use log::trace;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::PathBuf;

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroupSortField {
    #[default]
    Name,
    CreatedAt,
    UpdatedAt,
}

impl GroupSortField {
    /// Unknown fields sort by name
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "created_at" => GroupSortField::CreatedAt,
            "updated_at" => GroupSortField::UpdatedAt,
            _ => GroupSortField::Name,
        }
    }

    fn compare(self, a: &Group, b: &Group) -> Ordering {
        match self {
            GroupSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            GroupSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            GroupSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

/// CRUD over a user's groups or the groups shared by all admins
pub struct GroupManager {
    scope: GroupScope,
    path: PathBuf,
    cache: Option<Vec<Group>>,
}

impl GroupManager {
    pub fn new(layout: &DataLayout, scope: GroupScope) -> Self {
        GroupManager {
            path: layout.groups_file(&scope),
            scope,
            cache: None,
        }
    }

    fn groups(&mut self) -> Result<&[Group], GroupError> {
        let groups = match self.cache.take() {
            Some(groups) => groups,
            None => read_collection(&self.path)?,
        };
        let groups = self.cache.insert(groups);
        Ok(groups.as_slice())
    }

    fn load_fresh(&self) -> Result<Vec<Group>, GroupError> {
        Ok(read_collection(&self.path)?)
    }

    fn store(&mut self, groups: Vec<Group>) -> Result<(), GroupError> {
        write_collection(&self.path, &groups)?;
        self.cache = Some(groups);
        Ok(())
    }

    pub fn reload(&mut self) -> Result<&mut Self, GroupError> {
        self.cache = Some(self.load_fresh()?);
        Ok(self)
    }

    pub fn get(&mut self, id: u64) -> Result<Group, GroupError> {
        self.groups()?
            .iter()
            .find(|group| group.id == id)
            .cloned()
            .ok_or(GroupError::NotFound)
    }

    pub fn get_by_name(&mut self, name: &str) -> Result<Group, GroupError> {
        let name = name.trim().to_lowercase();
        self.groups()?
            .iter()
            .find(|group| group.name.trim().to_lowercase() == name)
            .cloned()
            .ok_or(GroupError::NotFound)
    }

    pub fn get_all(&mut self) -> Result<Vec<Group>, GroupError> {
        Ok(self.groups()?.to_vec())
    }

    pub fn add(&mut self, input: &GroupInput) -> Result<Group, GroupError> {
        let name = validate_name(&input.name)?;
        validate_shared(input.is_shared)?;

        let mut groups = self.load_fresh()?;
        check_duplicate_name(&groups, &name, None)?;

        let default_shared = match self.scope {
            GroupScope::Shared => 1,
            GroupScope::User(_) => 0,
        };
        let created_at = now();

        let group = Group {
            id: next_id(&groups),
            name,
            color: input
                .color
                .as_deref()
                .map(str::trim)
                .filter(|color| !color.is_empty())
                .unwrap_or(DEFAULT_GROUP_COLOR)
                .to_string(),
            description: input
                .description
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            is_shared: input.is_shared.unwrap_or(default_shared),
            created_at,
            updated_at: created_at,
        };

        groups.push(group.clone());
        self.store(groups)?;

        trace!("Added group {} to {}", group.name, self.path.display());
        Ok(group)
    }

    /// Fields the input leaves out keep their current values
    pub fn update(&mut self, id: u64, input: &GroupInput) -> Result<Group, GroupError> {
        let name = validate_name(&input.name)?;
        validate_shared(input.is_shared)?;

        let mut groups = self.load_fresh()?;
        let index = groups
            .iter()
            .position(|group| group.id == id)
            .ok_or(GroupError::NotFound)?;
        check_duplicate_name(&groups, &name, Some(id))?;

        let group = &mut groups[index];
        group.name = name;
        if let Some(color) = input
            .color
            .as_deref()
            .map(str::trim)
            .filter(|color| !color.is_empty())
        {
            group.color = color.to_string();
        }
        if let Some(description) = &input.description {
            group.description = description.trim().to_string();
        }
        if let Some(is_shared) = input.is_shared {
            group.is_shared = is_shared;
        }
        group.updated_at = now();
        let group = group.clone();

        self.store(groups)?;
        Ok(group)
    }

    /// Contacts keep referring to the deleted group's name
    pub fn delete(&mut self, id: u64) -> Result<Group, GroupError> {
        let mut groups = self.load_fresh()?;
        let index = groups
            .iter()
            .position(|group| group.id == id)
            .ok_or(GroupError::NotFound)?;

        let group = groups.remove(index);
        self.store(groups)?;

        trace!("Deleted group {} from {}", group.name, self.path.display());
        Ok(group)
    }

    pub fn delete_all(&mut self) -> Result<usize, GroupError> {
        let count = self.load_fresh()?.len();
        self.store(Vec::new())?;
        Ok(count)
    }

    pub fn count(&mut self) -> Result<usize, GroupError> {
        Ok(self.groups()?.len())
    }

    /// Case-insensitive substring match on name or description
    pub fn search(&mut self, query: &str) -> Result<Vec<Group>, GroupError> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.get_all();
        }

        Ok(self
            .groups()?
            .iter()
            .filter(|group| {
                group.name.to_lowercase().contains(&query)
                    || group.description.to_lowercase().contains(&query)
            })
            .cloned()
            .collect())
    }

    pub fn sort(
        &mut self,
        field: GroupSortField,
        order: SortOrder,
    ) -> Result<Vec<Group>, GroupError> {
        let groups = self.get_all()?;
        Ok(Self::sort_list(groups, field, order))
    }

    pub fn sort_list(
        mut groups: Vec<Group>,
        field: GroupSortField,
        order: SortOrder,
    ) -> Vec<Group> {
        groups.sort_by(|a, b| order.apply(field.compare(a, b)));
        groups
    }

    pub fn statistics(&mut self) -> Result<GroupStatistics, GroupError> {
        let groups = self.groups()?;
        let colors: HashSet<&str> = groups
            .iter()
            .map(|group| group.color.as_str())
            .filter(|color| !color.is_empty())
            .collect();

        Ok(GroupStatistics {
            total_groups: groups.len(),
            has_description: groups
                .iter()
                .filter(|group| !group.description.trim().is_empty())
                .count(),
            colors_used: colors.len(),
            group_names: groups.iter().map(|group| group.name.clone()).collect(),
        })
    }

    /// Non-empty group names, for pickers
    pub fn names(&mut self) -> Result<Vec<String>, GroupError> {
        Ok(self
            .groups()?
            .iter()
            .filter(|group| !group.name.trim().is_empty())
            .map(|group| group.name.clone())
            .collect())
    }
}

fn validate_name(name: &str) -> Result<String, GroupError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GroupError::MissingName);
    }

    let length = name.chars().count();
    if length < MIN_NAME_LENGTH {
        return Err(GroupError::NameTooShort);
    }
    if length > MAX_NAME_LENGTH {
        return Err(GroupError::NameTooLong);
    }

    Ok(name.to_string())
}

/// `is_shared` is a flag stored as 0 or 1
fn validate_shared(is_shared: Option<u8>) -> Result<(), GroupError> {
    match is_shared {
        None | Some(0 | 1) => Ok(()),
        Some(_) => Err(GroupError::InvalidShared),
    }
}

fn check_duplicate_name(
    groups: &[Group],
    name: &str,
    exclude: Option<u64>,
) -> Result<(), GroupError> {
    let name = name.to_lowercase();
    let duplicate = groups.iter().any(|group| {
        Some(group.id) != exclude && group.name.trim().to_lowercase() == name
    });

    if duplicate {
        Err(GroupError::DuplicateName)
    } else {
        Ok(())
    }
}
