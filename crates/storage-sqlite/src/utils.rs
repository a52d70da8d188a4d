//! Utility functions for SQLite storage operations.
//!
//! SQLite columns here are TEXT for timestamps, dates and decimals. These
//! helpers convert between the stored text and the domain types, plus chunking
//! for `IN (...)` queries.

use chrono::{NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use log::error;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Maximum number of parameters for SQLite IN (...) queries.
///
/// SQLite limits the number of bound parameters per statement (historically 999).
/// 500 leaves room for the other parameters of a query.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Chunk a slice into smaller slices for batch SQLite queries.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Current UTC time in the stored RFC3339 form.
pub fn now_text() -> String {
    datetime_to_text(&Utc::now().naive_utc())
}

/// Fixed-width RFC3339 (microseconds, `Z` suffix) so text order matches time order.
pub fn datetime_to_text(dt: &NaiveDateTime) -> String {
    dt.and_utc().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses a stored RFC3339 timestamp. Corrupt values are logged and read as "now".
pub fn text_to_datetime(s: &str) -> NaiveDateTime {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_utc())
        .unwrap_or_else(|e| {
            error!("Failed to parse datetime '{}': {}", s, e);
            Utc::now().naive_utc()
        })
}

pub fn date_to_text(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn text_to_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|e| {
        error!("Failed to parse date '{}': {}", s, e);
        NaiveDate::default()
    })
}

/// Parses a stored decimal. Corrupt values are logged and read as zero.
pub fn text_to_decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap_or_else(|e| {
        error!("Failed to parse decimal '{}': {}", s, e);
        Decimal::ZERO
    })
}
