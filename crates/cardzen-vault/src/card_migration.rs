//! Ad-hoc schema migration for stored card records.
//!
//! Early versions stored `dueDate` and `statementDate` as full ISO date-time
//! strings; the current schema keeps only the day of the month. Whatever was
//! read from a backing store passes through here before reaching the UI.

use chrono::{DateTime, Datelike, NaiveDate};
use serde_json::Value;
use tracing::warn;

/// Day substituted when a legacy date string cannot be parsed.
pub const FALLBACK_DAY: u8 = 1;

const DATE_FIELDS: [&str; 2] = ["dueDate", "statementDate"];

/// Normalizes a raw stored card into the current schema.
///
/// Total and idempotent: numbers pass through untouched and every string
/// collapses to an integer day (unparseable ones to [`FALLBACK_DAY`], with a
/// warning), so applying the migration twice is a no-op.
pub fn migrate_card(mut raw: Value) -> Value {
    if let Some(object) = raw.as_object_mut() {
        for field in DATE_FIELDS {
            if let Some(Value::String(text)) = object.get(field) {
                let day = parse_day(text).unwrap_or_else(|| {
                    warn!(field, value = %text, "unparseable legacy date, defaulting to day 1");
                    u32::from(FALLBACK_DAY)
                });
                object.insert(field.to_string(), Value::from(day));
            }
        }
    }
    raw
}

fn parse_day(text: &str) -> Option<u32> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.day());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.day());
    }
    None
}
