//! Merge planner
//!
//! Computes the minimal additive change set for one incoming row against a
//! matched contact (or a freshly created one). Nothing here writes to the
//! store: the planner only decides, the driver applies. Existing values
//! are never overwritten — phone and email are appended when absent,
//! birthday is set once and then left alone forever.

use csync_common::birthday;
use csync_common::contact::{Birthday, ContactCard, IncomingRecord};
use csync_common::phone;
use tracing::warn;

/// What the planner intends to change, plus the human-readable summary
/// rendered for skeptical-mode confirmation. Consumed immediately by the
/// driver; lines are in fixed order phone, email, birthday.
#[derive(Debug, Clone, Default)]
pub struct MergePlan {
    pub add_phone: bool,
    pub add_email: bool,
    pub set_birthday: Option<Birthday>,
    lines: Vec<String>,
}

impl MergePlan {
    /// True when the row would change nothing.
    pub fn is_empty(&self) -> bool {
        !self.add_phone && !self.add_email && self.set_birthday.is_none()
    }

    /// One line per flagged change, in the order phone, email, birthday.
    pub fn describe(&self) -> &[String] {
        &self.lines
    }
}

/// Plan the additive changes for `incoming` against `existing`.
///
/// `existing == None` means a brand-new contact: every non-empty,
/// parseable incoming field is planned. Unparsable birthdays are logged
/// and treated as "no birthday provided" — never fatal.
pub fn plan(
    existing: Option<&ContactCard>,
    incoming: &IncomingRecord,
    reference_year: i32,
) -> MergePlan {
    let mut plan = MergePlan::default();

    if !incoming.phone.is_empty() {
        let needle = phone::normalize(&incoming.phone);
        let already_present = existing.is_some_and(|contact| {
            contact
                .phones
                .iter()
                .any(|stored| phone::normalize(stored) == needle)
        });
        if !already_present {
            plan.add_phone = true;
            plan.lines.push(format!("Add phone number: {}", incoming.phone));
        }
    }

    if !incoming.email.is_empty() {
        let needle = incoming.email.trim().to_lowercase();
        let already_present = existing.is_some_and(|contact| {
            contact
                .emails
                .iter()
                .any(|stored| stored.trim().to_lowercase() == needle)
        });
        if !already_present {
            plan.add_email = true;
            plan.lines.push(format!("Add email: {}", incoming.email));
        }
    }

    // First non-empty birthday wins; an existing one is never corrected,
    // even when the incoming value differs.
    let has_birthday = existing.is_some_and(|contact| contact.birthday.is_some());
    if !incoming.birthday.is_empty() && !has_birthday {
        match birthday::parse_with_year(&incoming.birthday, reference_year) {
            Some(date) => {
                let bday = Birthday::from_parsed(date, reference_year);
                plan.set_birthday = Some(bday);
                plan.lines.push(format!("Set birthday: {}", bday.display()));
            }
            None => {
                warn!("could not parse date: {}", incoming.birthday);
            }
        }
    }

    plan
}
