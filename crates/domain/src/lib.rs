// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod classification;
mod error;
mod numbering;
mod report;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{
    format_date, format_date_day_first, format_timestamp, parse_date, parse_timestamp,
    truncate_to_seconds,
};
pub use classification::{
    CAUSE_OPTIONS, CORRECTION_ACTION_OPTIONS, ClassificationField, ORIGIN_OPTIONS,
    PROCESS_OPTIONS, SELECTION_SEPARATOR, join_selections, split_selections,
};
pub use error::DomainError;
pub use numbering::{next_report_number, sequence_for_year};
pub use report::{
    ClosureDetails, Evidence, EvidenceUpload, ReopeningDetails, Report, ReportFields,
    ReportRecord, non_empty,
};
pub use status::ReportStatus;
pub use types::{Category, EffectivenessVerdict, EvidenceCategory, ReportNumber, Severity};
pub use validation::{validate_report_fields, validate_selections};
