// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{FiledReport, PersistenceError, SqlitePersistence};
use ncr::{Command, TransitionResult, apply};
use ncr_domain::{EffectivenessVerdict, EvidenceCategory, Report, ReportStatus};
use time::macros::datetime;

use super::{create_new_report, create_test_photo};

fn close_command() -> Command {
    Command::Close {
        closed_by: Some(String::from("Bruno")),
        notes: Some(String::from("Re-welded")),
        effectiveness: EffectivenessVerdict::Effective,
        evidence: vec![create_test_photo("after.png")],
    }
}

fn reopen_command() -> Command {
    Command::Reopen {
        reopened_by: Some(String::from("Carla")),
        reason: Some(String::from("Crack returned")),
        evidence: vec![create_test_photo("again.png")],
    }
}

fn file_one(persistence: &mut SqlitePersistence) -> Report {
    let filed: FiledReport = persistence
        .file_report(&create_new_report(2024, "Porosity", &["before.png"]))
        .unwrap();
    persistence.get_report(filed.id).unwrap()
}

#[test]
fn test_close_persists_fields_and_closing_evidence() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let report: Report = file_one(&mut persistence);

    let result: TransitionResult =
        apply(&report, close_command(), datetime!(2024-05-20 10:15:30)).unwrap();
    persistence.apply_transition(&result).unwrap();

    let closed: Report = persistence.get_report(report.id).unwrap();
    assert_eq!(closed.status, ReportStatus::Closed);
    assert_eq!(closed.closure.closed_by.as_deref(), Some("Bruno"));
    assert_eq!(closed.closure.notes.as_deref(), Some("Re-welded"));
    assert_eq!(
        closed.closure.effectiveness,
        Some(EffectivenessVerdict::Effective)
    );
    assert_eq!(
        closed.closure.closed_at,
        Some(datetime!(2024-05-20 10:15:30))
    );

    let closing = persistence
        .list_evidence(report.id, EvidenceCategory::Closing)
        .unwrap();
    assert_eq!(closing.len(), 1);
    assert_eq!(closing[0].filename, "after.png");
    let opening = persistence
        .list_evidence(report.id, EvidenceCategory::Opening)
        .unwrap();
    assert_eq!(opening.len(), 1);
    assert_eq!(opening[0].filename, "before.png");
}

#[test]
fn test_reopen_preserves_closing_fields() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let report: Report = file_one(&mut persistence);

    let close = apply(&report, close_command(), datetime!(2024-05-20 10:15:30)).unwrap();
    persistence.apply_transition(&close).unwrap();
    let closed: Report = persistence.get_report(report.id).unwrap();

    let reopen = apply(&closed, reopen_command(), datetime!(2024-06-01 08:00:00)).unwrap();
    persistence.apply_transition(&reopen).unwrap();

    let reopened: Report = persistence.get_report(report.id).unwrap();
    assert_eq!(reopened.status, ReportStatus::InAction);
    assert_eq!(reopened.closure, closed.closure);
    assert_eq!(reopened.reopening.reopened_by.as_deref(), Some("Carla"));
    assert_eq!(
        reopened.reopening.reason.as_deref(),
        Some("Crack returned")
    );
    assert_eq!(
        reopened.reopening.reopened_at,
        Some(datetime!(2024-06-01 08:00:00))
    );
    assert_eq!(
        persistence
            .list_evidence(report.id, EvidenceCategory::Reopening)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_stale_transition_is_rejected_without_writes() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let report: Report = file_one(&mut persistence);

    let first = apply(&report, close_command(), datetime!(2024-05-20 10:15:30)).unwrap();
    let second = apply(&report, close_command(), datetime!(2024-05-20 10:16:00)).unwrap();
    persistence.apply_transition(&first).unwrap();

    let result = persistence.apply_transition(&second);
    assert_eq!(
        result,
        Err(PersistenceError::StatusChanged {
            report_id: report.id
        })
    );
    assert_eq!(
        persistence
            .list_evidence(report.id, EvidenceCategory::Closing)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_transition_for_missing_report() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let mut report: Report = file_one(&mut persistence);
    report.id = 999;

    let result = apply(&report, close_command(), datetime!(2024-05-20 10:15:30)).unwrap();
    assert_eq!(
        persistence.apply_transition(&result),
        Err(PersistenceError::ReportNotFound(999))
    );
}
