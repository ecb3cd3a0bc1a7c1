//! Birthday string parsing.
//!
//! Incoming birthdays arrive in whatever shape the spreadsheet author typed:
//! "Sep-17", "March 5th", "03/18/2024", "25 August 1992", "1992-08-25".
//! A fixed pattern list is tried in order (first match consumes the input,
//! no pattern is retried), then a general-purpose date parser as a last
//! resort. Year-absent patterns get the reference year substituted; the
//! demotion of reference-year dates to the sentinel year happens later, in
//! [`Birthday::from_parsed`](crate::contact::Birthday::from_parsed).

use chrono::{Datelike, Local, NaiveDate};

/// Month-name + day patterns carrying no year. chrono's `%b` accepts both
/// abbreviated and full month names when parsing, so one entry covers both.
const YEARLESS_FORMATS: [&str; 2] = ["%b-%d", "%b %d"];

/// Explicit-year patterns: US month/day order, day/month order, ISO.
const DATED_FORMATS: [&str; 5] = ["%m/%d/%Y", "%m/%d/%y", "%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d"];

/// Parse a birthday string against the current calendar year.
///
/// Returns `None` when nothing matches; the caller logs the raw string and
/// treats the row as "no birthday provided" (non-fatal).
pub fn parse(raw: &str) -> Option<NaiveDate> {
    parse_with_year(raw, Local::now().year())
}

/// Parse a birthday string, substituting `reference_year` for year-absent
/// inputs. Split out from [`parse`] so tests are deterministic across
/// year boundaries.
pub fn parse_with_year(raw: &str, reference_year: i32) -> Option<NaiveDate> {
    let cleaned = strip_ordinal_suffixes(raw.trim());
    if cleaned.is_empty() {
        return None;
    }

    for fmt in YEARLESS_FORMATS {
        let candidate = format!("{} {}", reference_year, cleaned);
        let fmt_with_year = format!("%Y {}", fmt);
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, &fmt_with_year) {
            return Some(date);
        }
    }

    for fmt in DATED_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, fmt) {
            return Some(date);
        }
    }

    // Last resort: free-form parse ("25 August 1992", "September 13, 1993").
    dateparser::parse(&cleaned).ok().map(|dt| dt.date_naive())
}

/// Strip English ordinal suffixes from day numbers: "March 5th" -> "March 5".
fn strip_ordinal_suffixes(s: &str) -> String {
    s.split_whitespace()
        .map(|token| {
            let lower = token.to_ascii_lowercase();
            for suffix in ["st", "nd", "rd", "th"] {
                if let Some(stem) = lower.strip_suffix(suffix) {
                    if !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()) {
                        return token[..stem.len()].to_string();
                    }
                }
            }
            token.to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}
