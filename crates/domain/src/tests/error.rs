// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ClassificationField, DomainError};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidReportNumber(String::from("abc"));
    assert_eq!(
        format!("{err}"),
        "Invalid report number 'abc': expected YYYY-NNN"
    );

    let err: DomainError = DomainError::InvalidClassification {
        field: ClassificationField::CorrectionAction,
        value: String::from("Burn"),
    };
    assert_eq!(
        format!("{err}"),
        "'Burn' is not a valid correction action option"
    );

    let err: DomainError = DomainError::SequenceExhausted { year: 2024 };
    assert_eq!(format!("{err}"), "No report numbers left for year 2024");

    let err: DomainError = DomainError::MissingRequiredField { field: "title" };
    assert_eq!(format!("{err}"), "Required field 'title' is missing");

    let err: DomainError = DomainError::InvalidStatusTransition {
        from: String::from("closed"),
        to: String::from("closed"),
        reason: String::from("report is already closed"),
    };
    assert_eq!(
        format!("{err}"),
        "Cannot transition from 'closed' to 'closed': report is already closed"
    );
}
