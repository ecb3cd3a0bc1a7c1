//! Identity matcher
//!
//! Finds candidate contacts for an incoming row by normalized full-name
//! comparison: exact equality always qualifies, otherwise a fuzzy
//! similarity ratio (0-100) must exceed the threshold. Candidates keep
//! store order; phone corroboration picks among them when the incoming
//! row carries a number the store already knows.

use csync_common::contact::ContactCard;
use csync_common::phone;
use tracing::debug;

/// Threshold at which only exact name matches qualify.
pub const EXACT_THRESHOLD: f64 = 100.0;

/// A contact provisionally identified as possibly matching an incoming
/// record, pending corroboration or confirmation.
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    pub card: ContactCard,
    /// Full-name similarity ratio (0-100) against the incoming record.
    pub score: f64,
}

/// Find candidate contacts for the given name at one threshold.
///
/// A candidate qualifies when its similarity score exceeds `threshold` OR
/// its normalized full name is exactly equal (exact match ignores the
/// threshold). Store order is preserved.
pub fn find_candidates(
    contacts: &[ContactCard],
    first_name: &str,
    last_name: &str,
    threshold: f64,
) -> Vec<MatchCandidate> {
    let full_name = normalized_full_name(first_name, last_name);

    contacts
        .iter()
        .filter_map(|contact| {
            let existing = contact.normalized_full_name();
            let score = similarity(&full_name, &existing);
            if existing == full_name || score > threshold {
                Some(MatchCandidate {
                    card: contact.clone(),
                    score,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Two-pass matching: exact-only first, fuzzy only when that comes up
/// empty. Keeps a fuzzy near-miss from masking an exact hit when both
/// exist in the store.
pub fn find_candidates_two_pass(
    contacts: &[ContactCard],
    first_name: &str,
    last_name: &str,
    fuzzy_threshold: f64,
) -> Vec<MatchCandidate> {
    let exact = find_candidates(contacts, first_name, last_name, EXACT_THRESHOLD);
    if !exact.is_empty() {
        debug!("{} exact name candidate(s)", exact.len());
        return exact;
    }

    let fuzzy = find_candidates(contacts, first_name, last_name, fuzzy_threshold);
    debug!(
        "{} fuzzy candidate(s) above threshold {}",
        fuzzy.len(),
        fuzzy_threshold
    );
    fuzzy
}

/// Pick the first candidate whose stored phone list contains the incoming
/// phone (compared in canonical form). Empty incoming phone never
/// corroborates.
pub fn corroborate_by_phone<'a>(
    candidates: &'a [MatchCandidate],
    raw_phone: &str,
) -> Option<&'a MatchCandidate> {
    let needle = phone::normalize(raw_phone);
    if needle.is_empty() {
        return None;
    }

    candidates
        .iter()
        .find(|candidate| {
            candidate
                .card
                .phones
                .iter()
                .any(|stored| phone::normalize(stored) == needle)
        })
}

fn normalized_full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name).trim().to_lowercase()
}

/// Full-name similarity ratio scaled to 0-100.
fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use csync_common::contact::{ContactCard, ContactId};

    fn card(first: &str, last: &str, phones: &[&str]) -> ContactCard {
        ContactCard {
            id: ContactId::new(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            phones: phones.iter().map(|p| p.to_string()).collect(),
            emails: vec![],
            birthday: None,
        }
    }

    #[test]
    fn exact_match_qualifies_at_any_threshold() {
        let contacts = vec![card("Nova", "Galaxy", &[])];
        let found = find_candidates(&contacts, "nova", "GALAXY", EXACT_THRESHOLD);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn near_miss_qualifies_only_below_exact_threshold() {
        let contacts = vec![card("Xenon", "Quasar", &[])];
        assert!(find_candidates(&contacts, "Xander", "Quasar", EXACT_THRESHOLD).is_empty());
        let fuzzy = find_candidates(&contacts, "Xenon", "Quasa", 80.0);
        assert_eq!(fuzzy.len(), 1);
        assert!(fuzzy[0].score > 80.0 && fuzzy[0].score < 100.0);
    }

    #[test]
    fn unrelated_name_never_qualifies() {
        let contacts = vec![card("Lyra", "Stellar", &[])];
        assert!(find_candidates(&contacts, "Nova", "Galaxy", 90.0).is_empty());
    }

    #[test]
    fn two_pass_prefers_exact_hit_over_fuzzy_near_miss() {
        let contacts = vec![card("Nova", "Galaxies", &[]), card("Nova", "Galaxy", &[])];
        let found = find_candidates_two_pass(&contacts, "Nova", "Galaxy", 80.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].card.last_name, "Galaxy");
    }

    #[test]
    fn two_pass_falls_back_to_fuzzy_when_no_exact_hit() {
        let contacts = vec![card("Nova", "Galaxxy", &[])];
        let found = find_candidates_two_pass(&contacts, "Nova", "Galaxy", 80.0);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn candidates_keep_store_order() {
        let contacts = vec![
            card("Nova", "Galaxy", &["111"]),
            card("Nova", "Galaxy", &["222"]),
        ];
        let found = find_candidates(&contacts, "Nova", "Galaxy", EXACT_THRESHOLD);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].card.phones, vec!["111"]);
    }

    #[test]
    fn phone_corroboration_picks_the_right_duplicate() {
        let contacts = vec![
            card("Nova", "Galaxy", &["+15551112222"]),
            card("Nova", "Galaxy", &["+16789012345"]),
        ];
        let candidates = find_candidates(&contacts, "Nova", "Galaxy", EXACT_THRESHOLD);
        let hit = corroborate_by_phone(&candidates, "678-901-2345").unwrap();
        assert_eq!(hit.card.phones, vec!["+16789012345"]);
    }

    #[test]
    fn empty_incoming_phone_never_corroborates() {
        let contacts = vec![card("Nova", "Galaxy", &["+15551112222"])];
        let candidates = find_candidates(&contacts, "Nova", "Galaxy", EXACT_THRESHOLD);
        assert!(corroborate_by_phone(&candidates, "").is_none());
        assert!(corroborate_by_phone(&candidates, "n/a").is_none());
    }
}
