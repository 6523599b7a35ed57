//! Date conventions shared by storage and display.
//!
//! The backing file stores every date as ISO `YYYY-MM-DD`; that is the one
//! canonical on-disk representation. Earlier versions of this tool wrote
//! pre-rendered display strings instead (`"July, 2024"`, later
//! `"12 July, 2024"`), which broke re-parsing after every reload.
//! [`parse_stored`] still accepts those legacy shapes so that
//! old files can be migrated, but nothing writes them anymore.

use chrono::NaiveDate;

use crate::error::LedgerError;

/// Canonical on-disk date format.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d";

/// Sentinel rendered for an absent grant date.
pub const GRANT_NONE: &str = "None";

/// Serializes a date for the backing file.
#[must_use]
pub fn format_storage(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

/// Renders a date for display, e.g. `"12 July, 2024"`.
#[must_use]
pub fn format_display(date: NaiveDate) -> String {
    date.format("%-d %B, %Y").to_string()
}

/// Renders an optional grant date for display, using the [`GRANT_NONE`]
/// sentinel when absent.
#[must_use]
pub fn format_grant_display(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| GRANT_NONE.to_string(), format_display)
}

/// Parses a date value read from the backing file.
///
/// Accepts, in order: the canonical ISO form, the day-level display forms
/// (`"12 July, 2024"`, `"12 July 2024"`), and the month-level form written
/// by the earliest versions (`"July, 2024"`, `"July 2024"` — resolved to
/// the first of the month).
///
/// # Errors
///
/// Returns [`LedgerError::InvalidDate`] when no known format matches.
pub fn parse_stored(value: &str) -> Result<NaiveDate, LedgerError> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, STORAGE_FORMAT) {
        return Ok(date);
    }
    for format in ["%d %B, %Y", "%d %B %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }
    // Month-level legacy form: inject day 1 and reuse the day-level parser.
    let with_day = format!("1 {value}");
    for format in ["%d %B, %Y", "%d %B %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&with_day, format) {
            return Ok(date);
        }
    }

    Err(LedgerError::InvalidDate(value.to_string()))
}

/// Parses an optional grant-date value read from the backing file.
///
/// An empty field or the [`GRANT_NONE`] sentinel means no grant has been
/// issued yet.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidDate`] when the value is present but
/// matches no known format.
pub fn parse_stored_optional(value: &str) -> Result<Option<NaiveDate>, LedgerError> {
    let value = value.trim();
    if value.is_empty() || value == GRANT_NONE {
        return Ok(None);
    }
    parse_stored(value).map(Some)
}
