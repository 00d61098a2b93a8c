// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Filing, listing and reading reports.

use ncr_domain::{Category, EvidenceCategory, ReportStatus, Severity};

use crate::{
    AccessLevel, ApiError, FileReportRequest, ListReportsQuery, ReportInput, file_report,
    get_evidence, get_report, import_csv, list_evidence, list_reports, next_number,
};

use super::helpers::{
    TEST_BASE_URL, create_test_input, create_test_photo, create_test_today, file_test_report,
    setup_test_persistence,
};

#[test]
fn test_file_report_allocates_number_and_stores_evidence() {
    let mut persistence = setup_test_persistence();
    let request = FileReportRequest {
        report: create_test_input("Weld porosity"),
        photos: vec![create_test_photo("a.jpg"), create_test_photo("b.jpg")],
    };

    let result = file_report(
        &mut persistence,
        AccessLevel::Quality,
        request,
        create_test_today(),
        TEST_BASE_URL,
    )
    .expect("Filing should succeed");

    assert_eq!(result.response.number, "2024-001");
    assert_eq!(result.response.evidence_count, 2);
    assert!(result.response.notification.is_none());

    let report = get_report(&mut persistence, result.response.report_id).unwrap();
    assert_eq!(report.status, ReportStatus::Open);
    assert_eq!(report.date.as_deref(), Some("2024-05-14"));
    assert_eq!(report.cause.as_deref(), Some("Welding; Supplier"));
    assert_eq!(report.severity, Some(Severity::High));
    assert_eq!(report.category, Some(Category::Quality));

    let evidence = list_evidence(&mut persistence, report.id, "opening").unwrap();
    assert_eq!(evidence.evidence.len(), 2);
    assert_eq!(evidence.category, EvidenceCategory::Opening);
}

#[test]
fn test_file_report_builds_opened_notification() {
    let mut persistence = setup_test_persistence();
    let request = FileReportRequest {
        report: create_test_input("Weld porosity"),
        photos: Vec::new(),
    };

    let result = file_report(
        &mut persistence,
        AccessLevel::Quality,
        request,
        create_test_today(),
        TEST_BASE_URL,
    )
    .unwrap();

    let message = result.notification.expect("Filing should notify");
    assert_eq!(message.subject, "[NCR OPENED] No. 2024-001 - Weld porosity");
    assert!(message.body.contains("Severity: High"));
    assert!(message.body.contains(TEST_BASE_URL));
}

#[test]
fn test_file_report_numbers_sequentially_within_year() {
    let mut persistence = setup_test_persistence();
    file_test_report(&mut persistence, "First");
    file_test_report(&mut persistence, "Second");

    let preview = next_number(&mut persistence, None, create_test_today()).unwrap();
    assert_eq!(preview.number, "2024-003");

    let other_year =
        next_number(&mut persistence, Some("03/01/2025"), create_test_today()).unwrap();
    assert_eq!(other_year.number, "2025-001");
}

#[test]
fn test_file_report_refuses_to_repeat_exhausted_number() {
    let mut persistence = setup_test_persistence();
    let csv = format!("number;date;title\n2024-{};2024-01-02;Legacy\n", u64::MAX);
    import_csv(&mut persistence, AccessLevel::Quality, csv.as_bytes()).unwrap();

    let result = file_report(
        &mut persistence,
        AccessLevel::Quality,
        FileReportRequest {
            report: create_test_input("After legacy import"),
            photos: vec![create_test_photo("a.jpg")],
        },
        create_test_today(),
        TEST_BASE_URL,
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "report_numbering"
    ));
    let reports = list_reports(&mut persistence, &ListReportsQuery::default()).unwrap();
    assert_eq!(reports.reports.len(), 1);
}

#[test]
fn test_next_number_rejects_bad_date() {
    let mut persistence = setup_test_persistence();

    let result = next_number(&mut persistence, Some("yesterday"), create_test_today());

    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "date"));
}

#[test]
fn test_file_report_uses_explicit_date() {
    let mut persistence = setup_test_persistence();
    let mut input = create_test_input("Backdated");
    input.date = Some(String::from("2023-12-30"));

    let result = file_report(
        &mut persistence,
        AccessLevel::Quality,
        FileReportRequest {
            report: input,
            photos: Vec::new(),
        },
        create_test_today(),
        TEST_BASE_URL,
    )
    .unwrap();

    assert_eq!(result.response.number, "2023-001");
}

#[test]
fn test_file_report_rejects_visitor() {
    let mut persistence = setup_test_persistence();

    let result = file_report(
        &mut persistence,
        AccessLevel::Visitor,
        FileReportRequest {
            report: create_test_input("Nope"),
            photos: Vec::new(),
        },
        create_test_today(),
        TEST_BASE_URL,
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert!(
        list_reports(&mut persistence, &ListReportsQuery::default())
            .unwrap()
            .reports
            .is_empty()
    );
}

#[test]
fn test_file_report_requires_title() {
    let mut persistence = setup_test_persistence();
    let input = ReportInput {
        title: Some(String::from("   ")),
        ..create_test_input("ignored")
    };

    let result = file_report(
        &mut persistence,
        AccessLevel::Quality,
        FileReportRequest {
            report: input,
            photos: Vec::new(),
        },
        create_test_today(),
        TEST_BASE_URL,
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "title"));
}

#[test]
fn test_file_report_rejects_unknown_selection() {
    let mut persistence = setup_test_persistence();
    let mut input = create_test_input("Bad cause");
    input.cause = vec![String::from("Gremlins")];

    let result = file_report(
        &mut persistence,
        AccessLevel::Quality,
        FileReportRequest {
            report: input,
            photos: Vec::new(),
        },
        create_test_today(),
        TEST_BASE_URL,
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_file_report_rejects_unknown_severity() {
    let mut persistence = setup_test_persistence();
    let mut input = create_test_input("Bad severity");
    input.severity = Some(String::from("Apocalyptic"));

    let result = file_report(
        &mut persistence,
        AccessLevel::Quality,
        FileReportRequest {
            report: input,
            photos: Vec::new(),
        },
        create_test_today(),
        TEST_BASE_URL,
    );

    assert!(
        matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "severity")
    );
}

#[test]
fn test_list_reports_filters_by_status_and_severity() {
    let mut persistence = setup_test_persistence();
    file_test_report(&mut persistence, "High one");
    let mut low = create_test_input("Low one");
    low.severity = Some(String::from("Low"));
    file_report(
        &mut persistence,
        AccessLevel::Quality,
        FileReportRequest {
            report: low,
            photos: Vec::new(),
        },
        create_test_today(),
        TEST_BASE_URL,
    )
    .unwrap();

    let all = list_reports(&mut persistence, &ListReportsQuery::default()).unwrap();
    assert_eq!(all.reports.len(), 2);
    assert_eq!(all.reports[0].title.as_deref(), Some("Low one"));

    let query = ListReportsQuery {
        status: Some(String::from("Open, In Action")),
        severity: Some(String::from("low")),
        ..ListReportsQuery::default()
    };
    let filtered = list_reports(&mut persistence, &query).unwrap();
    assert_eq!(filtered.reports.len(), 1);
    assert_eq!(filtered.reports[0].severity, Some(Severity::Low));
}

#[test]
fn test_list_reports_rejects_unknown_status_label() {
    let mut persistence = setup_test_persistence();
    let query = ListReportsQuery {
        status: Some(String::from("Pending")),
        ..ListReportsQuery::default()
    };

    let result = list_reports(&mut persistence, &query);

    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "status"));
}

#[test]
fn test_get_report_not_found() {
    let mut persistence = setup_test_persistence();

    let result = get_report(&mut persistence, 42);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_get_evidence_returns_bytes_only_for_matching_category() {
    let mut persistence = setup_test_persistence();
    let report_id = file_test_report(&mut persistence, "Photos");
    let listed = list_evidence(&mut persistence, report_id, "opening").unwrap();
    let evidence_id = listed.evidence[0].id;

    let download = get_evidence(&mut persistence, report_id, "opening", evidence_id).unwrap();
    assert_eq!(download.filename, "opening.jpg");
    assert_eq!(download.media_type, "image/jpeg");
    assert_eq!(download.content.len(), listed.evidence[0].size);

    let wrong = get_evidence(&mut persistence, report_id, "closing", evidence_id);
    assert!(matches!(wrong, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_list_evidence_rejects_unknown_category() {
    let mut persistence = setup_test_persistence();
    let report_id = file_test_report(&mut persistence, "Photos");

    let result = list_evidence(&mut persistence, report_id, "sideways");

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_list_evidence_for_missing_report() {
    let mut persistence = setup_test_persistence();

    let result = list_evidence(&mut persistence, 99, "opening");

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
