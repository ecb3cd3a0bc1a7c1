//! Shared types for the csync contact reconciliation tool: the contact
//! data model, the store capability interface and its implementations,
//! and the pure normalizers (phone, birthday).

pub mod birthday;
pub mod contact;
pub mod error;
pub mod phone;
pub mod store;

pub use crate::error::{Error, Result};
