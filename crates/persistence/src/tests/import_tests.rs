// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ImportSummary, SqlitePersistence};
use ncr_domain::{Report, ReportFields, ReportRecord, ReportStatus};

use super::{create_new_report, create_test_date};

fn record(number: Option<&str>, title: &str) -> ReportRecord {
    ReportRecord {
        number: number.map(String::from),
        date: Some(create_test_date(2024)),
        fields: ReportFields {
            title: Some(String::from(title)),
            ..ReportFields::default()
        },
        ..ReportRecord::default()
    }
}

#[test]
fn test_import_updates_existing_number_in_place() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    persistence
        .file_report(&create_new_report(2024, "One", &[]))
        .unwrap();
    let second = persistence
        .file_report(&create_new_report(2024, "Two", &[]))
        .unwrap();

    let summary: ImportSummary = persistence
        .import_records(&[record(Some("2024-002"), "Two, revised")])
        .unwrap();

    assert_eq!(summary, ImportSummary { inserted: 0, updated: 1 });
    let reports: Vec<Report> = persistence.list_reports().unwrap();
    assert_eq!(reports.len(), 2);
    let updated: Report = persistence.get_report(second.id).unwrap();
    assert_eq!(updated.fields.title.as_deref(), Some("Two, revised"));
    assert_eq!(updated.number.as_deref(), Some("2024-002"));
    assert_eq!(updated.status, ReportStatus::Open);
}

#[test]
fn test_import_inserts_unknown_number_verbatim() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let summary: ImportSummary = persistence
        .import_records(&[record(Some("2019-777"), "Legacy")])
        .unwrap();

    assert_eq!(summary.inserted, 1);
    let reports: Vec<Report> = persistence.list_reports().unwrap();
    assert_eq!(reports[0].number.as_deref(), Some("2019-777"));
    assert_eq!(reports[0].status, ReportStatus::Open);
}

#[test]
fn test_import_matches_rows_inserted_earlier_in_batch() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let summary: ImportSummary = persistence
        .import_records(&[
            record(Some("2024-010"), "First"),
            record(Some(" 2024-010 "), "Second"),
        ])
        .unwrap();

    assert_eq!(summary, ImportSummary { inserted: 1, updated: 1 });
    assert_eq!(summary.processed(), 2);
    let reports: Vec<Report> = persistence.list_reports().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].fields.title.as_deref(), Some("Second"));
}

#[test]
fn test_import_keeps_status_when_record_has_none_and_applies_given_status() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    persistence
        .import_records(&[ReportRecord {
            status: Some(ReportStatus::Blocked),
            ..record(Some("2024-001"), "Blocked one")
        }])
        .unwrap();

    persistence
        .import_records(&[record(Some("2024-001"), "Still blocked")])
        .unwrap();
    let report: Report = persistence.list_reports().unwrap().remove(0);
    assert_eq!(report.status, ReportStatus::Blocked);

    persistence
        .import_records(&[ReportRecord {
            status: Some(ReportStatus::Closed),
            ..record(Some("2024-001"), "Closed now")
        }])
        .unwrap();
    let report: Report = persistence.list_reports().unwrap().remove(0);
    assert_eq!(report.status, ReportStatus::Closed);
}

#[test]
fn test_import_updates_newest_of_duplicate_numbers() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let older: i64 = persistence
        .create_report("2023-005", &create_new_report(2023, "Older", &[]))
        .unwrap();
    let newer: i64 = persistence
        .create_report("2023-005", &create_new_report(2023, "Newer", &[]))
        .unwrap();

    let summary: ImportSummary = persistence
        .import_records(&[record(Some("2023-005"), "Revised")])
        .unwrap();

    assert_eq!(summary, ImportSummary { inserted: 0, updated: 1 });
    let older: Report = persistence.get_report(older).unwrap();
    let newer: Report = persistence.get_report(newer).unwrap();
    assert_eq!(older.fields.title.as_deref(), Some("Older"));
    assert_eq!(newer.fields.title.as_deref(), Some("Revised"));
}

#[test]
fn test_import_rows_without_number_always_insert() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();

    let summary: ImportSummary = persistence
        .import_records(&[record(None, "A"), record(Some("  "), "B")])
        .unwrap();

    assert_eq!(summary.inserted, 2);
    assert!(
        persistence
            .list_reports()
            .unwrap()
            .iter()
            .all(|r| r.number.is_none())
    );
}

#[test]
fn test_import_does_not_disturb_numbering_of_trusted_numbers() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    persistence
        .import_records(&[record(Some("2024-041"), "Restored")])
        .unwrap();

    let filed = persistence
        .file_report(&create_new_report(2024, "Fresh", &[]))
        .unwrap();
    assert_eq!(filed.number, "2024-042");
}
