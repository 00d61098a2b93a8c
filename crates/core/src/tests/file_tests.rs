// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{NewReport, file};
use ncr_domain::{ReportFields, ReportStatus};
use time::macros::date;

use super::helpers::{create_test_fields, create_test_photo};

#[test]
fn test_file_sets_status_open() {
    let new_report: NewReport = file(
        date!(2024 - 05 - 14),
        create_test_fields(),
        vec![create_test_photo("before.jpg")],
    );

    assert_eq!(new_report.status, ReportStatus::Open);
    assert_eq!(new_report.evidence.len(), 1);
}

#[test]
fn test_file_normalizes_text_fields() {
    let fields: ReportFields = ReportFields {
        title: Some(String::from("  Loose bolt ")),
        description: Some(String::from("  ")),
        ..ReportFields::default()
    };

    let new_report: NewReport = file(date!(2024 - 05 - 14), fields, Vec::new());

    assert_eq!(new_report.fields.title.as_deref(), Some("Loose bolt"));
    assert_eq!(new_report.fields.description, None);
}

#[test]
fn test_file_does_not_reject_incomplete_reports() {
    let new_report: NewReport = file(date!(2024 - 05 - 14), ReportFields::default(), Vec::new());
    assert_eq!(new_report.fields.title, None);
}
