// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use ncr::{LifecycleChange, TransitionResult};
use ncr_domain::format_timestamp;
use tracing::info;

use crate::diesel_schema::reports;
use crate::error::PersistenceError;
use crate::mutations::reports::insert_evidence;
use crate::queries::reports::report_exists;

/// Persists a Close or Reopen together with its evidence.
///
/// The update only matches while the report still holds the status the
/// transition was validated against. Closing fields are never cleared by a
/// Reopen.
///
/// # Errors
///
/// Returns an error if:
/// - The report does not exist
/// - The report's status changed since the transition was validated
/// - Any write fails (nothing is written in that case)
pub fn apply_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<(), PersistenceError> {
    let report_id: i64 = result.report_id;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let target = reports::table
            .filter(reports::id.eq(report_id))
            .filter(reports::status.eq(result.previous_status.as_str()));

        let updated: usize = match &result.change {
            LifecycleChange::Close(record) => diesel::update(target)
                .set((
                    reports::status.eq(result.new_status().as_str()),
                    reports::closed_at.eq(format_timestamp(record.closed_at)),
                    reports::closed_by.eq(record.closed_by.as_deref()),
                    reports::closing_notes.eq(record.notes.as_deref()),
                    reports::effectiveness.eq(record.effectiveness.as_str()),
                ))
                .execute(conn)?,
            LifecycleChange::Reopen(record) => diesel::update(target)
                .set((
                    reports::status.eq(result.new_status().as_str()),
                    reports::reopened_at.eq(format_timestamp(record.reopened_at)),
                    reports::reopened_by.eq(record.reopened_by.as_deref()),
                    reports::reopen_reason.eq(record.reason.as_deref()),
                ))
                .execute(conn)?,
        };

        if updated == 0 {
            return Err(if report_exists(conn, report_id)? {
                PersistenceError::StatusChanged { report_id }
            } else {
                PersistenceError::ReportNotFound(report_id)
            });
        }

        insert_evidence(
            conn,
            report_id,
            result.change.evidence_category(),
            &result.evidence,
        )
    })?;

    info!(
        report_id,
        from = result.previous_status.as_str(),
        to = result.new_status().as_str(),
        evidence = result.evidence.len(),
        "Applied lifecycle transition"
    );
    Ok(())
}
