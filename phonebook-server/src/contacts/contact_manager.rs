use crate::errors::contact_error::ContactError;
use crate::models::contact::{Contact, ContactInput, ContactPatch, phone_digits};
use crate::models::now;
use crate::models::owner::Owner;
use crate::store::{DataLayout, next_id, read_collection, write_collection};
use email_address::EmailAddress;
use log::trace;
use std::path::PathBuf;

const MIN_PHONE_DIGITS: usize = 9;

/// CRUD over one owner's contacts file
pub struct ContactManager {
    path: PathBuf,
}

impl ContactManager {
    pub fn new(layout: &DataLayout, owner: &Owner) -> Self {
        ContactManager {
            path: layout.contacts_file(owner),
        }
    }

    pub(crate) fn load(&self) -> Result<Vec<Contact>, ContactError> {
        Ok(read_collection(&self.path)?)
    }

    pub(crate) fn save(&self, contacts: &[Contact]) -> Result<(), ContactError> {
        Ok(write_collection(&self.path, contacts)?)
    }

    pub fn get(&self, id: u64) -> Result<Contact, ContactError> {
        self.load()?
            .into_iter()
            .find(|contact| contact.id == id)
            .ok_or(ContactError::NotFound)
    }

    pub fn get_all(&self) -> Result<Vec<Contact>, ContactError> {
        self.load()
    }

    pub fn add(&self, input: &ContactInput) -> Result<Contact, ContactError> {
        let mut contacts = self.load()?;
        let created_at = now();

        let contact = Contact {
            id: next_id(&contacts),
            name: input.name.trim().to_string(),
            phone: input.phone.trim().to_string(),
            phone_normalized: phone_digits(&input.phone),
            email: input.email.trim().to_string(),
            address: input.address.trim().to_string(),
            group: input.group.trim().to_string(),
            notes: input.notes.trim().to_string(),
            avatar: input.avatar.clone().unwrap_or_default(),
            created_at,
            updated_at: created_at,
        };
        validate(&contact)?;
        check_duplicate_phone(&contacts, &contact)?;

        contacts.push(contact.clone());
        self.save(&contacts)?;

        trace!("Added contact {} to {}", contact.id, self.path.display());
        Ok(contact)
    }

    /// Replaces every editable field, keeping id, creation time and an avatar the input omits
    pub fn update(&self, id: u64, input: &ContactInput) -> Result<Contact, ContactError> {
        let mut contacts = self.load()?;
        let index = position(&contacts, id)?;

        let current = &contacts[index];
        let contact = Contact {
            id,
            name: input.name.trim().to_string(),
            phone: input.phone.trim().to_string(),
            phone_normalized: phone_digits(&input.phone),
            email: input.email.trim().to_string(),
            address: input.address.trim().to_string(),
            group: input.group.trim().to_string(),
            notes: input.notes.trim().to_string(),
            avatar: input
                .avatar
                .clone()
                .unwrap_or_else(|| current.avatar.clone()),
            created_at: current.created_at,
            updated_at: now(),
        };
        validate(&contact)?;
        check_duplicate_phone(&contacts, &contact)?;

        contacts[index] = contact.clone();
        self.save(&contacts)?;
        Ok(contact)
    }

    pub fn update_partial(&self, id: u64, patch: &ContactPatch) -> Result<Contact, ContactError> {
        let mut contacts = self.load()?;
        let index = position(&contacts, id)?;

        let mut contact = contacts[index].clone();
        let trimmed = |value: &Option<String>| value.as_ref().map(|value| value.trim().to_string());

        if let Some(name) = trimmed(&patch.name) {
            contact.name = name;
        }
        if let Some(phone) = trimmed(&patch.phone) {
            contact.phone_normalized = phone_digits(&phone);
            contact.phone = phone;
        }
        if let Some(email) = trimmed(&patch.email) {
            contact.email = email;
        }
        if let Some(address) = trimmed(&patch.address) {
            contact.address = address;
        }
        if let Some(group) = trimmed(&patch.group) {
            contact.group = group;
        }
        if let Some(notes) = trimmed(&patch.notes) {
            contact.notes = notes;
        }
        if let Some(avatar) = &patch.avatar {
            contact.avatar = avatar.clone();
        }
        contact.updated_at = now();

        validate(&contact)?;
        check_duplicate_phone(&contacts, &contact)?;

        contacts[index] = contact.clone();
        self.save(&contacts)?;
        Ok(contact)
    }

    /// Removes exactly the contact with this id
    pub fn delete(&self, id: u64) -> Result<Contact, ContactError> {
        let mut contacts = self.load()?;
        let index = position(&contacts, id)?;

        let contact = contacts.remove(index);
        self.save(&contacts)?;

        trace!("Deleted contact {id} from {}", self.path.display());
        Ok(contact)
    }
}

fn position(contacts: &[Contact], id: u64) -> Result<usize, ContactError> {
    contacts
        .iter()
        .position(|contact| contact.id == id)
        .ok_or(ContactError::NotFound)
}

fn validate(contact: &Contact) -> Result<(), ContactError> {
    if contact.name.is_empty() {
        return Err(ContactError::MissingField("name"));
    }

    if contact.phone.is_empty() {
        return Err(ContactError::MissingField("phone"));
    }

    if contact.phone_normalized.len() < MIN_PHONE_DIGITS {
        return Err(ContactError::InvalidPhone);
    }

    if !contact.email.is_empty() && !EmailAddress::is_valid(&contact.email) {
        return Err(ContactError::InvalidEmail);
    }

    Ok(())
}

/// Phones are duplicates when their digits match, the contact itself excluded
fn check_duplicate_phone(contacts: &[Contact], contact: &Contact) -> Result<(), ContactError> {
    let duplicate = contacts.iter().any(|existing| {
        existing.id != contact.id && phone_digits(&existing.phone) == contact.phone_normalized
    });

    if duplicate {
        Err(ContactError::DuplicatePhone)
    } else {
        Ok(())
    }
}
