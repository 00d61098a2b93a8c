// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::classification::ClassificationField;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Report number does not follow the `YYYY-NNN` format.
    InvalidReportNumber(String),
    /// Year is outside the range a report number can carry.
    InvalidYear(i32),
    /// The highest stored sequence for a year has no successor.
    SequenceExhausted {
        /// The year whose numbering is exhausted.
        year: i32,
    },
    /// Status label is not recognized.
    InvalidStatus {
        /// The unrecognized status label.
        status: String,
    },
    /// Severity label is not recognized.
    InvalidSeverity(String),
    /// Category label is not recognized.
    InvalidCategory(String),
    /// Effectiveness verdict label is not recognized.
    InvalidEffectiveness(String),
    /// Evidence category label is not recognized.
    InvalidEvidenceCategory(String),
    /// A multi-select value is not part of its option set.
    InvalidClassification {
        /// The multi-select field.
        field: ClassificationField,
        /// The rejected value.
        value: String,
    },
    /// A required field is missing or blank.
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// A lifecycle transition is not permitted from the current status.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReportNumber(value) => {
                write!(f, "Invalid report number '{value}': expected YYYY-NNN")
            }
            Self::InvalidYear(year) => write!(f, "Invalid year: {year}"),
            Self::SequenceExhausted { year } => {
                write!(f, "No report numbers left for year {year}")
            }
            Self::InvalidStatus { status } => write!(f, "Invalid status: '{status}'"),
            Self::InvalidSeverity(value) => write!(f, "Invalid severity: '{value}'"),
            Self::InvalidCategory(value) => write!(f, "Invalid category: '{value}'"),
            Self::InvalidEffectiveness(value) => {
                write!(f, "Invalid effectiveness verdict: '{value}'")
            }
            Self::InvalidEvidenceCategory(value) => {
                write!(f, "Invalid evidence category: '{value}'")
            }
            Self::InvalidClassification { field, value } => {
                write!(f, "'{value}' is not a valid {} option", field.label())
            }
            Self::MissingRequiredField { field } => {
                write!(f, "Required field '{field}' is missing")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from '{from}' to '{to}': {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
