// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, LifecycleChange, TransitionResult, apply};
use ncr_domain::{EffectivenessVerdict, EvidenceCategory, ReportStatus};
use time::macros::datetime;

use super::helpers::{
    create_close_command, create_reopen_command, create_test_report, test_now,
};

#[test]
fn test_close_records_actor_notes_verdict_and_timestamp() {
    let report = create_test_report(ReportStatus::Open);

    let result: TransitionResult = apply(&report, create_close_command(), test_now()).unwrap();

    assert_eq!(result.report_id, 7);
    assert_eq!(result.previous_status, ReportStatus::Open);
    assert_eq!(result.new_status(), ReportStatus::Closed);
    let LifecycleChange::Close(record) = &result.change else {
        panic!("expected a close change");
    };
    assert_eq!(record.closed_by.as_deref(), Some("Bruno"));
    assert_eq!(record.notes.as_deref(), Some("Re-welded and inspected"));
    assert_eq!(record.effectiveness, EffectivenessVerdict::Effective);
    assert_eq!(record.closed_at, datetime!(2024-05-20 10:15:30));
}

#[test]
fn test_close_evidence_is_tagged_closing() {
    let report = create_test_report(ReportStatus::InAction);

    let result: TransitionResult = apply(&report, create_close_command(), test_now()).unwrap();

    assert_eq!(result.change.evidence_category(), EvidenceCategory::Closing);
    assert_eq!(result.evidence.len(), 1);
    assert_eq!(result.evidence[0].filename, "after.jpg");
}

#[test]
fn test_reopen_lands_in_action_with_reopening_evidence() {
    let report = create_test_report(ReportStatus::Closed);

    let result: TransitionResult = apply(&report, create_reopen_command(), test_now()).unwrap();

    assert_eq!(result.new_status(), ReportStatus::InAction);
    assert_eq!(
        result.change.evidence_category(),
        EvidenceCategory::Reopening
    );
    let LifecycleChange::Reopen(record) = &result.change else {
        panic!("expected a reopen change");
    };
    assert_eq!(record.reopened_by.as_deref(), Some("Carla"));
    assert_eq!(record.reason.as_deref(), Some("Crack reappeared"));
}

#[test]
fn test_blank_actor_and_notes_become_absent() {
    let report = create_test_report(ReportStatus::Open);
    let command: Command = Command::Close {
        closed_by: Some(String::from("   ")),
        notes: Some(String::new()),
        effectiveness: EffectivenessVerdict::ToVerify,
        evidence: Vec::new(),
    };

    let result: TransitionResult = apply(&report, command, test_now()).unwrap();

    let LifecycleChange::Close(record) = result.change else {
        panic!("expected a close change");
    };
    assert_eq!(record.closed_by, None);
    assert_eq!(record.notes, None);
}
