// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::classification::{ClassificationField, split_selections};
use crate::error::DomainError;
use crate::report::ReportFields;

/// Validates the fields of a report about to be filed.
///
/// This is the form-level rule set: it is applied when a report is filed
/// interactively, never to imported rows.
///
/// # Arguments
///
/// * `fields` - The normalized report fields
///
/// # Errors
///
/// Returns an error if:
/// - The title is missing or blank
/// - Any multi-select value is not part of its option set
pub fn validate_report_fields(fields: &ReportFields) -> Result<(), DomainError> {
    // Rule: title must not be blank
    if fields.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
        return Err(DomainError::MissingRequiredField { field: "title" });
    }

    validate_selections(ClassificationField::Cause, fields.cause.as_deref())?;
    validate_selections(ClassificationField::Process, fields.process.as_deref())?;
    validate_selections(ClassificationField::Origin, fields.origin.as_deref())?;
    validate_selections(
        ClassificationField::CorrectionAction,
        fields.correction_action.as_deref(),
    )?;

    Ok(())
}

/// Validates that every selection in a stored multi-valued field belongs to
/// the field's option set.
///
/// # Errors
///
/// Returns `DomainError::InvalidClassification` for the first unknown value.
pub fn validate_selections(
    field: ClassificationField,
    stored: Option<&str>,
) -> Result<(), DomainError> {
    let Some(stored) = stored else {
        return Ok(());
    };

    for selection in split_selections(stored) {
        if !field.accepts(&selection) {
            return Err(DomainError::InvalidClassification {
                field,
                value: selection,
            });
        }
    }
    Ok(())
}
