//! In-memory contact store for tests and dry runs.

use crate::contact::{Birthday, ContactCard, ContactId};
use crate::error::{Error, Result};
use crate::store::ContactStore;

/// Contact store backed by a plain `Vec`. `save` is a no-op that counts
/// invocations, which lets tests assert the once-per-batch save policy.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contacts: Vec<ContactCard>,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with pre-existing contacts.
    pub fn with_contacts(contacts: Vec<ContactCard>) -> Self {
        MemoryStore {
            contacts,
            save_count: 0,
        }
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    fn find_mut(&mut self, id: ContactId) -> Result<&mut ContactCard> {
        self.contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::Store(format!("unknown contact id: {}", id)))
    }
}

impl ContactStore for MemoryStore {
    fn list(&self) -> Result<Vec<ContactCard>> {
        Ok(self.contacts.clone())
    }

    fn create(&mut self, first_name: &str, last_name: &str) -> Result<ContactId> {
        let id = ContactId::new();
        self.contacts.push(ContactCard {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phones: Vec::new(),
            emails: Vec::new(),
            birthday: None,
        });
        Ok(id)
    }

    fn append_phone(&mut self, id: ContactId, value: &str) -> Result<()> {
        self.find_mut(id)?.phones.push(value.to_string());
        Ok(())
    }

    fn append_email(&mut self, id: ContactId, value: &str) -> Result<()> {
        self.find_mut(id)?.emails.push(value.to_string());
        Ok(())
    }

    fn set_birthday(&mut self, id: ContactId, value: Birthday) -> Result<()> {
        self.find_mut(id)?.birthday = Some(value);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.save_count += 1;
        Ok(())
    }
}
