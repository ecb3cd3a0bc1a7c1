//! csync library interface
//!
//! Exposes the matcher, merge planner, and reconciliation driver for
//! integration testing; the binary in `main.rs` wires them to the CLI.

pub mod config;
pub mod confirm;
pub mod driver;
pub mod ingest;
pub mod services;

pub use crate::config::SyncConfig;
pub use crate::driver::{BatchSummary, Mode, Reconciler, RowOutcome};
