//! Contact data model shared by the matcher, merge planner, and stores.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder year stored when a birthday's real year is unknown.
pub const SENTINEL_YEAR: i32 = 1900;

/// One row read from the incoming tabular source.
///
/// Empty strings mean "not provided". Immutable once read; rows with an
/// empty first name are skipped by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRecord {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub birthday: String,
}

impl IncomingRecord {
    /// Full name as shown in prompts and log lines.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Opaque handle to a contact owned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(Uuid);

impl ContactId {
    pub fn new() -> Self {
        ContactId(Uuid::new_v4())
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A calendar birthday, with the year flagged as real or placeholder.
///
/// When `year_known` is false the stored year is [`SENTINEL_YEAR`]: the
/// month and day are meaningful, the year is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    pub date: NaiveDate,
    pub year_known: bool,
}

impl Birthday {
    /// Re-stamp a parsed date for storage.
    ///
    /// Year-absent inputs were parsed with `reference_year` substituted, so
    /// any date landing in the reference year is treated as year-unknown and
    /// demoted to the sentinel year. A genuine birthday explicitly given for
    /// the reference year is indistinguishable and gets demoted too; that
    /// misfire is accepted behavior, not corrected here.
    pub fn from_parsed(date: NaiveDate, reference_year: i32) -> Self {
        if date.year() == reference_year {
            // 1900 is not a leap year; Feb 29 falls back to Feb 28.
            let demoted = date
                .with_year(SENTINEL_YEAR)
                .or_else(|| NaiveDate::from_ymd_opt(SENTINEL_YEAR, date.month(), 28))
                .unwrap_or(date);
            Birthday {
                date: demoted,
                year_known: false,
            }
        } else {
            Birthday {
                date,
                year_known: true,
            }
        }
    }

    /// Render as `YYYY-MM-DD` when the year is known, `MM-DD` otherwise.
    pub fn display(&self) -> String {
        if self.year_known {
            self.date.format("%Y-%m-%d").to_string()
        } else {
            self.date.format("%m-%d").to_string()
        }
    }
}

/// Read snapshot of one stored contact.
///
/// The store owns the contact; this card is a point-in-time copy used for
/// matching and merge planning. Mutations go back through the store handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactCard {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub birthday: Option<Birthday>,
}

impl ContactCard {
    /// Normalized full name used for identity comparison.
    pub fn normalized_full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_lowercase()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
