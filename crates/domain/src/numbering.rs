// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sequential report number allocation.
//!
//! The next number for a year is one past the highest sequence already in
//! use for that year. Existing numbers that do not parse as `YYYY-<digits>`
//! for the requested year are ignored rather than treated as errors.
//!
//! Allocation is a pure computation over the numbers the caller supplies.
//! Callers that need uniqueness must read the existing numbers and insert
//! the allocated one inside the same write transaction.

use crate::error::DomainError;
use crate::types::ReportNumber;

/// Returns the sequence of `number` if it belongs to `year`.
///
/// Leading and trailing whitespace is ignored. Any other deviation from
/// `{year}-<digits>` yields `None`.
#[must_use]
pub fn sequence_for_year(number: &str, year: i32) -> Option<u64> {
    let parsed: ReportNumber = ReportNumber::parse(number).ok()?;
    (parsed.year() == year).then_some(parsed.sequence())
}

/// Computes the next report number for `year`.
///
/// # Arguments
///
/// * `year` - The calendar year the new report belongs to
/// * `existing` - Every report number currently stored (any year)
///
/// # Errors
///
/// Returns `DomainError::InvalidYear` if `year` cannot be expressed as a
/// four-digit report number prefix, or `DomainError::SequenceExhausted` if
/// the highest stored sequence for `year` has no successor.
pub fn next_report_number<'a, I>(year: i32, existing: I) -> Result<ReportNumber, DomainError>
where
    I: IntoIterator<Item = &'a str>,
{
    let highest: Option<u64> = existing
        .into_iter()
        .filter_map(|number| sequence_for_year(number, year))
        .max();

    let next: u64 = match highest {
        None => 1,
        Some(max) => max
            .checked_add(1)
            .ok_or(DomainError::SequenceExhausted { year })?,
    };
    ReportNumber::new(year, next)
}
