use super::contact_manager::ContactManager;
use super::fields::{SearchField, SortField};
use crate::errors::contact_error::ContactError;
use crate::models::contact::{Contact, ContactInput, ContactPatch};
use crate::models::now;
use crate::models::owner::Owner;
use crate::models::sort_order::SortOrder;
use crate::models::statistics::ContactStatistics;
use crate::store::DataLayout;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

// `group:<name>` searches by group instead of by text
static GROUP_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*group:\s*(.*?)\s*$").expect("valid regex"));

/// An owner's contacts with a cached copy of the list.
///
/// Reads are served from the cache once loaded. Mutations always re-read the
/// file before changing it and refresh the cache with what they saved.
pub struct ContactList {
    manager: ContactManager,
    cache: Option<Vec<Contact>>,
}

impl ContactList {
    pub fn new(layout: &DataLayout, owner: &Owner) -> Self {
        ContactList {
            manager: ContactManager::new(layout, owner),
            cache: None,
        }
    }

    fn contacts(&mut self) -> Result<&[Contact], ContactError> {
        let contacts = match self.cache.take() {
            Some(contacts) => contacts,
            None => self.manager.load()?,
        };
        let contacts = self.cache.insert(contacts);
        Ok(contacts.as_slice())
    }

    fn store(&mut self, contacts: Vec<Contact>) -> Result<(), ContactError> {
        self.manager.save(&contacts)?;
        self.cache = Some(contacts);
        Ok(())
    }

    pub fn get_all(&mut self) -> Result<Vec<Contact>, ContactError> {
        Ok(self.contacts()?.to_vec())
    }

    /// Drops the cache and reads the file again
    pub fn reload(&mut self) -> Result<&mut Self, ContactError> {
        self.cache = Some(self.manager.load()?);
        Ok(self)
    }

    pub fn get(&mut self, id: u64) -> Result<Contact, ContactError> {
        self.contacts()?
            .iter()
            .find(|contact| contact.id == id)
            .cloned()
            .ok_or(ContactError::NotFound)
    }

    pub fn add(&mut self, input: &ContactInput) -> Result<Contact, ContactError> {
        let contact = self.manager.add(input)?;
        self.reload()?;
        Ok(contact)
    }

    pub fn update(&mut self, id: u64, input: &ContactInput) -> Result<Contact, ContactError> {
        let contact = self.manager.update(id, input)?;
        self.reload()?;
        Ok(contact)
    }

    pub fn update_partial(
        &mut self,
        id: u64,
        patch: &ContactPatch,
    ) -> Result<Contact, ContactError> {
        let contact = self.manager.update_partial(id, patch)?;
        self.reload()?;
        Ok(contact)
    }

    pub fn delete(&mut self, id: u64) -> Result<Contact, ContactError> {
        let contact = self.manager.delete(id)?;
        self.reload()?;
        Ok(contact)
    }

    /// Empties the list, returns how many contacts were removed
    pub fn delete_all(&mut self) -> Result<usize, ContactError> {
        let count = self.manager.load()?.len();
        self.store(Vec::new())?;
        Ok(count)
    }

    /// Case-insensitive substring search over `fields`, all searchable fields when empty.
    ///
    /// A blank query returns every contact and `group:<name>` returns
    /// [`filter_by_group`](Self::filter_by_group) of that name.
    pub fn search(
        &mut self,
        query: &str,
        fields: &[SearchField],
    ) -> Result<Vec<Contact>, ContactError> {
        if query.trim().is_empty() {
            return self.get_all();
        }

        if let Some(captures) = GROUP_QUERY.captures(query) {
            let group = captures.get(1).map_or("", |group| group.as_str());
            return self.filter_by_group(group);
        }

        let fields = if fields.is_empty() {
            SearchField::ALL
        } else {
            fields
        };
        let query = query.trim().to_lowercase();

        Ok(self
            .contacts()?
            .iter()
            .filter(|contact| {
                fields
                    .iter()
                    .any(|field| field.value(contact).to_lowercase().contains(&query))
            })
            .cloned()
            .collect())
    }

    /// Contacts whose group equals `group` ignoring case, ungrouped contacts for an empty name
    pub fn filter_by_group(&mut self, group: &str) -> Result<Vec<Contact>, ContactError> {
        let group = group.trim().to_lowercase();

        Ok(self
            .contacts()?
            .iter()
            .filter(|contact| contact.group.trim().to_lowercase() == group)
            .cloned()
            .collect())
    }

    /// Sets the contact's group, an empty name removes it from its group
    pub fn assign_to_group(&mut self, id: u64, group: &str) -> Result<Contact, ContactError> {
        let mut contacts = self.manager.load()?;
        let contact = contacts
            .iter_mut()
            .find(|contact| contact.id == id)
            .ok_or(ContactError::NotFound)?;

        contact.group = group.trim().to_string();
        contact.updated_at = now();
        let contact = contact.clone();

        self.store(contacts)?;
        Ok(contact)
    }

    pub fn sort(
        &mut self,
        field: SortField,
        order: SortOrder,
    ) -> Result<Vec<Contact>, ContactError> {
        let contacts = self.get_all()?;
        Ok(Self::sort_list(contacts, field, order))
    }

    /// Stable sort of any list of contacts
    pub fn sort_list(
        mut contacts: Vec<Contact>,
        field: SortField,
        order: SortOrder,
    ) -> Vec<Contact> {
        contacts.sort_by(|a, b| order.apply(field.compare(a, b)));
        contacts
    }

    /// Sorts the list and saves it in that order
    pub fn sort_and_save(
        &mut self,
        field: SortField,
        order: SortOrder,
    ) -> Result<Vec<Contact>, ContactError> {
        let contacts = Self::sort_list(self.manager.load()?, field, order);
        self.store(contacts.clone())?;
        Ok(contacts)
    }

    pub fn count(&mut self) -> Result<usize, ContactError> {
        Ok(self.contacts()?.len())
    }

    /// Distinct group names in use, sorted
    pub fn get_groups(&mut self) -> Result<Vec<String>, ContactError> {
        let groups: BTreeSet<String> = self
            .contacts()?
            .iter()
            .map(|contact| contact.group.trim())
            .filter(|group| !group.is_empty())
            .map(String::from)
            .collect();

        Ok(groups.into_iter().collect())
    }

    pub fn statistics(&mut self) -> Result<ContactStatistics, ContactError> {
        let groups = self.get_groups()?;
        let contacts = self.contacts()?;
        let filled = |field: SearchField| {
            contacts
                .iter()
                .filter(|contact| !field.value(contact).trim().is_empty())
                .count()
        };

        Ok(ContactStatistics {
            total_contacts: contacts.len(),
            total_groups: groups.len(),
            has_email: filled(SearchField::Email),
            has_address: filled(SearchField::Address),
            has_notes: filled(SearchField::Notes),
            groups,
        })
    }
}
