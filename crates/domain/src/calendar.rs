// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date and timestamp text forms.
//!
//! Dates are stored as `YYYY-MM-DD` and timestamps as `YYYY-MM-DD HH:MM:SS`.
//! Parsing is lenient so that legacy spreadsheets import cleanly.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const DAY_FIRST_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[day]/[month]/[year]");
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Formats a date as `DD/MM/YYYY`, the form printed on documents.
#[must_use]
pub fn format_date_day_first(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn format_timestamp(at: PrimitiveDateTime) -> String {
    format!(
        "{} {:02}:{:02}:{:02}",
        format_date(at.date()),
        at.hour(),
        at.minute(),
        at.second()
    )
}

/// Drops the sub-second part of a timestamp.
#[must_use]
pub fn truncate_to_seconds(at: PrimitiveDateTime) -> PrimitiveDateTime {
    at.replace_nanosecond(0).unwrap_or(at)
}

fn parse_timestamp_exact(value: &str) -> Option<PrimitiveDateTime> {
    let without_fraction: &str = value.split_once('.').map_or(value, |(head, _)| head);
    let normalized: String = without_fraction.replacen('T', " ", 1);
    PrimitiveDateTime::parse(&normalized, TIMESTAMP_FORMAT).ok()
}

fn parse_date_exact(value: &str) -> Option<Date> {
    Date::parse(value, DATE_FORMAT)
        .ok()
        .or_else(|| Date::parse(value, DAY_FIRST_DATE_FORMAT).ok())
}

/// Parses a date in any accepted form.
///
/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY`, or a full timestamp (whose time part
/// is discarded). Returns `None` for anything else.
#[must_use]
pub fn parse_date(value: &str) -> Option<Date> {
    let trimmed: &str = value.trim();
    parse_date_exact(trimmed)
        .or_else(|| parse_timestamp_exact(trimmed).map(PrimitiveDateTime::date))
}

/// Parses a timestamp in any accepted form.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` with either a space or `T` separator and
/// optional fractional seconds (dropped). A bare date is read as midnight.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<PrimitiveDateTime> {
    let trimmed: &str = value.trim();
    parse_timestamp_exact(trimmed).or_else(|| parse_date_exact(trimmed).map(Date::midnight))
}
