//! Contact store capability interface.
//!
//! The core never owns contact persistence: it reads snapshots, requests
//! creation, and appends field values through this trait. Phone and email
//! lists are append-only; nothing here removes or rewrites an existing
//! value. The store handle is passed explicitly into the driver so tests
//! can substitute [`MemoryStore`].

mod json;
mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use crate::contact::{Birthday, ContactCard, ContactId};
use crate::error::Result;

/// Capability interface over the external contact store.
///
/// All operations are fallible: a store failure is fatal to the batch and
/// propagates without retry.
pub trait ContactStore {
    /// Snapshot every contact in store order.
    fn list(&self) -> Result<Vec<ContactCard>>;

    /// Create a new contact with the given names, returning its handle.
    fn create(&mut self, first_name: &str, last_name: &str) -> Result<ContactId>;

    /// Append a phone value (storage form) to the contact's phone list.
    fn append_phone(&mut self, id: ContactId, value: &str) -> Result<()>;

    /// Append an email value (as received) to the contact's email list.
    fn append_email(&mut self, id: ContactId, value: &str) -> Result<()>;

    /// Set the contact's birthday. The driver only calls this for contacts
    /// without one; stores do not arbitrate the first-wins policy.
    fn set_birthday(&mut self, id: ContactId, value: Birthday) -> Result<()>;

    /// Persist all accumulated changes. Called once per batch, after the
    /// last processed row.
    fn save(&mut self) -> Result<()>;
}
