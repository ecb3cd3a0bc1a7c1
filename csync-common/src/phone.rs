//! Phone number canonicalization.
//!
//! Two forms exist on purpose: the digits-only canonical form used solely
//! for equality comparison, and the `+`-prefixed storage form written back
//! to the contact store. Both functions are pure and total; input with no
//! digits normalizes to an empty string.

/// Default country code prepended when storing a number without one.
pub const DEFAULT_COUNTRY_CODE: &str = "+1";

/// Canonicalize a phone number for comparison.
///
/// Strips every non-digit character; a leading '1' on a number longer than
/// ten digits is treated as a US country-code prefix and dropped.
pub fn normalize(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() > 10 && digits.starts_with('1') {
        digits[1..].to_string()
    } else {
        digits
    }
}

/// Format a phone number for storage with the default "+1" country code.
pub fn format_for_storage(raw: &str) -> String {
    format_for_storage_with(raw, DEFAULT_COUNTRY_CODE)
}

/// Format a phone number for storage.
///
/// Numbers already carrying a '+' prefix are stored as received; everything
/// else is normalized and prefixed with `default_country_code`.
pub fn format_for_storage_with(raw: &str, default_country_code: &str) -> String {
    if raw.starts_with('+') {
        raw.to_string()
    } else {
        format!("{}{}", default_country_code, normalize(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(normalize("(540) 226-2697"), "5402262697");
    }

    #[test]
    fn normalize_drops_us_country_code() {
        assert_eq!(normalize("+1 (540) 226-2697"), "5402262697");
        assert_eq!(normalize("1-540-226-2697"), "5402262697");
    }

    #[test]
    fn normalize_keeps_leading_one_on_ten_digit_numbers() {
        // A ten-digit number starting with 1 has no prefix to strip.
        assert_eq!(normalize("123-456-7890"), "1234567890");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["(540) 226-2697", "+1 (540) 226-2697", "12345678901", ""] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn normalize_of_non_digit_input_is_empty() {
        assert_eq!(normalize("no digits here"), "");
    }

    #[test]
    fn storage_form_always_has_plus_prefix() {
        for raw in ["(540) 226-2697", "540-226-2697", "+44 20 7946 0958", ""] {
            assert!(format_for_storage(raw).starts_with('+'));
        }
    }

    #[test]
    fn storage_form_passes_through_existing_prefix() {
        assert_eq!(format_for_storage("+1 (540) 226-2697"), "+1 (540) 226-2697");
    }

    #[test]
    fn storage_form_prepends_default_country_code() {
        assert_eq!(format_for_storage("540-226-2697"), "+15402262697");
        assert_eq!(format_for_storage_with("540-226-2697", "+44"), "+445402262697");
    }
}
