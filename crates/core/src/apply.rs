// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{CloseRecord, LifecycleChange, NewReport, ReopenRecord, TransitionResult};
use ncr_domain::{
    EvidenceUpload, Report, ReportFields, ReportStatus, non_empty, truncate_to_seconds,
};
use time::{Date, PrimitiveDateTime};
use tracing::debug;

/// Prepares a report for filing.
///
/// Text fields are normalized (trimmed, blank as absent) and the status is
/// set to `Open`. Field validation is the caller's concern; this function
/// never rejects a report.
///
/// # Arguments
///
/// * `date` - The report date
/// * `fields` - The descriptive fields as entered
/// * `evidence` - Opening evidence
#[must_use]
pub fn file(date: Date, fields: ReportFields, evidence: Vec<EvidenceUpload>) -> NewReport {
    debug!(%date, evidence = evidence.len(), "Preparing report for filing");
    NewReport {
        date,
        fields: fields.normalized(),
        status: ReportStatus::Open,
        evidence,
    }
}

/// Applies a lifecycle command to a report, producing the transition to
/// persist.
///
/// # Arguments
///
/// * `current` - The report as currently stored (immutable)
/// * `command` - The command to apply
/// * `now` - The transition timestamp (truncated to whole seconds)
///
/// # Returns
///
/// * `Ok(TransitionResult)` describing the field changes and evidence
/// * `Err(CoreError)` if the transition is not allowed
///
/// # Errors
///
/// Returns an error if:
/// - Close is applied to a report that is already closed
/// - Reopen is applied to a report that is not closed
pub fn apply(
    current: &Report,
    command: Command,
    now: PrimitiveDateTime,
) -> Result<TransitionResult, CoreError> {
    let at: PrimitiveDateTime = truncate_to_seconds(now);
    debug!(
        report_id = current.id,
        status = current.status.as_str(),
        command = command.name(),
        "Applying lifecycle command"
    );

    match command {
        Command::Close {
            closed_by,
            notes,
            effectiveness,
            evidence,
        } => {
            current.status.validate_close()?;

            Ok(TransitionResult {
                report_id: current.id,
                previous_status: current.status,
                change: LifecycleChange::Close(CloseRecord {
                    closed_at: at,
                    closed_by: non_empty(closed_by),
                    notes: non_empty(notes),
                    effectiveness,
                }),
                evidence,
            })
        }
        Command::Reopen {
            reopened_by,
            reason,
            evidence,
        } => {
            current.status.validate_reopen()?;

            Ok(TransitionResult {
                report_id: current.id,
                previous_status: current.status,
                change: LifecycleChange::Reopen(ReopenRecord {
                    reopened_at: at,
                    reopened_by: non_empty(reopened_by),
                    reason: non_empty(reason),
                }),
                evidence,
            })
        }
    }
}
