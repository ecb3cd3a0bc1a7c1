//! JSON-file contact store.
//!
//! The concrete collaborator behind the [`ContactStore`] capability: a
//! single JSON document on disk holding the whole contact list. Changes
//! accumulate in memory and hit the file only on `save`, so a crash
//! mid-batch leaves the file at its pre-batch state.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::contact::{Birthday, ContactCard, ContactId};
use crate::error::{Error, Result};
use crate::store::ContactStore;

pub struct JsonStore {
    path: PathBuf,
    contacts: Vec<ContactCard>,
}

impl JsonStore {
    /// Open the store file, or start empty when it does not exist yet
    /// (first run bootstraps the file on save).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contacts = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            debug!("store file {} not found, starting empty", path.display());
            Vec::new()
        };
        info!(
            "opened contact store {} ({} contacts)",
            path.display(),
            contacts.len()
        );
        Ok(JsonStore { path, contacts })
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    fn find_mut(&mut self, id: ContactId) -> Result<&mut ContactCard> {
        self.contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::Store(format!("unknown contact id: {}", id)))
    }
}

impl ContactStore for JsonStore {
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
        let raw = serde_json::to_string_pretty(&self.contacts)?;
        fs::write(&self.path, raw)?;
        info!(
            "saved contact store {} ({} contacts)",
            self.path.display(),
            self.contacts.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn missing_file_opens_as_empty_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = JsonStore::open(dir.path().join("contacts.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn save_round_trips_through_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("contacts.json");

        let mut store = JsonStore::open(&path).unwrap();
        let id = store.create("Lyra", "Stellar").unwrap();
        store.append_phone(id, "+14567890123").unwrap();
        store.append_email(id, "lyra.stellar@example.com").unwrap();
        store
            .set_birthday(
                id,
                Birthday {
                    date: NaiveDate::from_ymd_opt(1992, 8, 25).unwrap(),
                    year_known: true,
                },
            )
            .unwrap();
        store.save().unwrap();

        let reopened = JsonStore::open(&path).unwrap();
        let contacts = reopened.list().unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].first_name, "Lyra");
        assert_eq!(contacts[0].phones, vec!["+14567890123"]);
        assert_eq!(contacts[0].emails, vec!["lyra.stellar@example.com"]);
        assert_eq!(contacts[0].birthday.unwrap().display(), "1992-08-25");
    }

    #[test]
    fn unknown_id_is_a_store_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = JsonStore::open(dir.path().join("contacts.json")).unwrap();
        let err = store.append_phone(ContactId::new(), "+15551234567");
        assert!(matches!(err, Err(Error::Store(_))));
    }
}
