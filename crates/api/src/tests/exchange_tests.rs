// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk exchange: tabular export and import.

use ncr_domain::{EffectivenessVerdict, ReportStatus, Severity};

use crate::{
    AccessLevel, ApiError, CloseReportRequest, EXPORT_COLUMNS, EXPORT_FILENAME, FileReportRequest,
    ListReportsQuery, ReopenReportRequest, canonical_column, close_report, detect_delimiter,
    export_csv, file_report, import_csv, list_reports, parse_cost_code_csv, parse_report_csv,
    reopen_report,
};

use super::helpers::{
    TEST_BASE_URL, create_test_input, create_test_now, create_test_photo, create_test_today,
    file_test_report, setup_test_persistence,
};

#[test]
fn test_canonical_column_accepts_english_portuguese_and_aliases() {
    assert_eq!(canonical_column("cost_code"), Some("cost_code"));
    assert_eq!(canonical_column(" Cost Code "), Some("cost_code"));
    assert_eq!(canonical_column("PEP"), Some("cost_code"));
    assert_eq!(canonical_column("rnc_num"), Some("number"));
    assert_eq!(canonical_column("RNC Nº"), Some("number"));
    assert_eq!(canonical_column("Título"), Some("title"));
    assert_eq!(canonical_column("categoria_risco"), Some("severity"));
    assert_eq!(canonical_column("\u{feff}data"), Some("date"));
    assert_eq!(canonical_column("colour"), None);
}

#[test]
fn test_detect_delimiter() {
    assert_eq!(detect_delimiter("a;b;c"), b';');
    assert_eq!(detect_delimiter("a,b,c"), b',');
    assert_eq!(detect_delimiter("a;b,c"), b',');
    assert_eq!(detect_delimiter("single"), b',');
}

#[test]
fn test_parse_report_csv_maps_legacy_headers() {
    let csv = "\u{feff}data;rnc_num;emitente;titulo;severidade;status;eficacia;encerrada_em\n\
               14/05/2024;2024-007;Ana;Trinca na solda;Alta;Encerrada;Eficaz;2024-05-20 08:00:00\n";

    let records = parse_report_csv(csv.as_bytes()).expect("Import should parse");

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.number.as_deref(), Some("2024-007"));
    assert_eq!(record.fields.issuer.as_deref(), Some("Ana"));
    assert_eq!(record.fields.title.as_deref(), Some("Trinca na solda"));
    assert_eq!(record.fields.severity, Some(Severity::High));
    assert_eq!(record.status, Some(ReportStatus::Closed));
    assert_eq!(
        record.closure.effectiveness,
        Some(EffectivenessVerdict::Effective)
    );
    assert!(record.closure.closed_at.is_some());
    assert_eq!(
        record.date.map(|d| d.to_string()).as_deref(),
        Some("2024-05-14")
    );
}

#[test]
fn test_parse_report_csv_drops_unparseable_values() {
    let csv = "number,date,severity,title\n2024-001,sometime,extreme,Still imported\n";

    let records = parse_report_csv(csv.as_bytes()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date, None);
    assert_eq!(records[0].fields.severity, None);
    assert_eq!(records[0].fields.title.as_deref(), Some("Still imported"));
}

#[test]
fn test_parse_report_csv_first_non_blank_duplicate_wins() {
    let csv = "number,pep,cost_code\n2024-002,,PEP-9\n2024-003,PEP-1,PEP-2\n";

    let records = parse_report_csv(csv.as_bytes()).unwrap();

    assert_eq!(records[0].fields.cost_code.as_deref(), Some("PEP-9"));
    assert_eq!(records[1].fields.cost_code.as_deref(), Some("PEP-1"));
}

#[test]
fn test_parse_report_csv_skips_blank_rows() {
    let csv = "number,title\n2024-001,One\n,\n2024-002,Two\n";

    let records = parse_report_csv(csv.as_bytes()).unwrap();

    assert_eq!(records.len(), 2);
}

#[test]
fn test_parse_report_csv_rejects_non_utf8() {
    let result = parse_report_csv(&[0xFF, 0xFE, 0x00, 0x41]);

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_parse_cost_code_csv_requires_code_column() {
    let codes = parse_cost_code_csv(b"Code;description\nA1;Pump\nB2;Valve\n").unwrap();
    assert_eq!(codes, vec![String::from("A1"), String::from("B2")]);

    let missing = parse_cost_code_csv(b"name\nA1\n");
    assert!(matches!(missing, Err(ApiError::InvalidInput { ref field, .. }) if field == "code"));
}

#[test]
fn test_export_writes_bom_header_and_labels() {
    let mut persistence = setup_test_persistence();
    let report_id = file_test_report(&mut persistence, "Porosity");
    close_report(
        &mut persistence,
        AccessLevel::Quality,
        report_id,
        CloseReportRequest::default(),
        Vec::new(),
        create_test_now(),
        TEST_BASE_URL,
    )
    .unwrap();

    let download = export_csv(&mut persistence).expect("Export should succeed");

    assert_eq!(download.filename, EXPORT_FILENAME);
    let text = String::from_utf8(download.content).unwrap();
    let text = text.strip_prefix('\u{feff}').expect("Export starts with a BOM");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(EXPORT_COLUMNS.join(";").as_str()));
    let row = lines.next().expect("One data row");
    assert!(row.contains(";2024-001;"));
    assert!(row.contains(";High;"));
    assert!(row.contains(";Closed;"));
    assert!(row.contains(";To Verify;"));
    assert!(row.contains("2024-05-14 16:30:05"));
}

#[test]
fn test_export_of_empty_register_has_header_only() {
    let mut persistence = setup_test_persistence();

    let download = export_csv(&mut persistence).unwrap();

    let text = String::from_utf8(download.content).unwrap();
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn test_export_then_import_updates_in_place() {
    let mut persistence = setup_test_persistence();
    file_test_report(&mut persistence, "First");
    file_test_report(&mut persistence, "Second");
    let exported = export_csv(&mut persistence).unwrap();

    let response = import_csv(&mut persistence, AccessLevel::Quality, &exported.content)
        .expect("Import should succeed");

    assert_eq!(response.updated, 2);
    assert_eq!(response.inserted, 0);
    assert_eq!(response.processed, 2);
    let reports = list_reports(&mut persistence, &ListReportsQuery::default()).unwrap();
    assert_eq!(reports.reports.len(), 2);
}

#[test]
fn test_export_then_import_preserves_every_field() {
    let mut persistence = setup_test_persistence();
    let mut input = create_test_input("Trinca na solda \"A\"; lote 7, turno B");
    input.description = Some(String::from("line1\nline2; with semi, comma"));
    input.references = Some(String::from("Desenho nº 42, rev. \"C\""));
    input.actions = Some(String::from("Inspeção visual; ensaio por líquido penetrante"));
    input.action_owner = Some(String::from("José Araújo"));
    let report_id = file_report(
        &mut persistence,
        AccessLevel::Quality,
        FileReportRequest {
            report: input,
            photos: vec![create_test_photo("opening.jpg")],
        },
        create_test_today(),
        TEST_BASE_URL,
    )
    .unwrap()
    .response
    .report_id;

    close_report(
        &mut persistence,
        AccessLevel::Quality,
        report_id,
        CloseReportRequest {
            closed_by: Some(String::from("Carla Dias")),
            notes: Some(String::from("n;1\r\nx")),
            effectiveness: Some(String::from("Not Effective")),
        },
        Vec::new(),
        create_test_now(),
        TEST_BASE_URL,
    )
    .unwrap();
    reopen_report(
        &mut persistence,
        AccessLevel::Quality,
        report_id,
        ReopenReportRequest {
            reopened_by: Some(String::from("Bruno Lima")),
            reason: Some(String::from("Reincidência após 2 dias, \"mesma\" posição")),
        },
        Vec::new(),
        create_test_now(),
    )
    .unwrap();

    let before = persistence.get_report(report_id).unwrap();
    let exported = export_csv(&mut persistence).unwrap();
    let response = import_csv(&mut persistence, AccessLevel::Quality, &exported.content).unwrap();
    let after = persistence.get_report(report_id).unwrap();

    assert_eq!(response.updated, 1);
    assert_eq!(response.inserted, 0);
    assert_eq!(before.status, ReportStatus::InAction);
    assert_eq!(before, after);
}

#[test]
fn test_import_inserts_unknown_numbers() {
    let mut persistence = setup_test_persistence();
    let csv = "number;date;title;status\n2023-015;2023-08-01;Legacy;Under Review\n";

    let response = import_csv(&mut persistence, AccessLevel::Quality, csv.as_bytes()).unwrap();

    assert_eq!(response.inserted, 1);
    let reports = list_reports(&mut persistence, &ListReportsQuery::default()).unwrap();
    assert_eq!(reports.reports[0].number.as_deref(), Some("2023-015"));
    assert_eq!(reports.reports[0].status, ReportStatus::UnderReview);
}

#[test]
fn test_import_rejects_visitor() {
    let mut persistence = setup_test_persistence();

    let result = import_csv(&mut persistence, AccessLevel::Visitor, b"number\n2024-001\n");

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}
