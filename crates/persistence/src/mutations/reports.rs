// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use ncr::NewReport;
use ncr_domain::{
    Category, ClosureDetails, EffectivenessVerdict, EvidenceCategory, EvidenceUpload,
    ReopeningDetails, ReportFields, ReportStatus, Severity, format_date, format_timestamp,
};
use time::Date;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::FiledReport;
use crate::diesel_schema::{evidence, reports};
use crate::error::PersistenceError;
use crate::queries::reports::next_number_for_year;

/// Column values for a report insert.
#[derive(Insertable)]
#[diesel(table_name = reports)]
pub(crate) struct NewReportRow<'a> {
    number: Option<&'a str>,
    report_date: Option<String>,
    issuer: Option<&'a str>,
    area: Option<&'a str>,
    cost_code: Option<&'a str>,
    title: Option<&'a str>,
    inspector: Option<&'a str>,
    description: Option<&'a str>,
    report_references: Option<&'a str>,
    cause: Option<&'a str>,
    process: Option<&'a str>,
    origin: Option<&'a str>,
    correction_action: Option<&'a str>,
    severity: Option<&'static str>,
    category: Option<&'static str>,
    actions: Option<&'a str>,
    status: &'static str,
    closed_at: Option<String>,
    closed_by: Option<&'a str>,
    closing_notes: Option<&'a str>,
    effectiveness: Option<&'static str>,
    action_owner: Option<&'a str>,
    reopened_at: Option<String>,
    reopened_by: Option<&'a str>,
    reopen_reason: Option<&'a str>,
}

impl<'a> NewReportRow<'a> {
    pub(crate) fn new(
        number: Option<&'a str>,
        date: Option<Date>,
        fields: &'a ReportFields,
        status: ReportStatus,
        closure: &'a ClosureDetails,
        reopening: &'a ReopeningDetails,
    ) -> Self {
        Self {
            number,
            report_date: date.map(format_date),
            issuer: fields.issuer.as_deref(),
            area: fields.area.as_deref(),
            cost_code: fields.cost_code.as_deref(),
            title: fields.title.as_deref(),
            inspector: fields.inspector.as_deref(),
            description: fields.description.as_deref(),
            report_references: fields.references.as_deref(),
            cause: fields.cause.as_deref(),
            process: fields.process.as_deref(),
            origin: fields.origin.as_deref(),
            correction_action: fields.correction_action.as_deref(),
            severity: fields.severity.as_ref().map(Severity::as_str),
            category: fields.category.as_ref().map(Category::as_str),
            actions: fields.actions.as_deref(),
            status: status.as_str(),
            closed_at: closure.closed_at.map(format_timestamp),
            closed_by: closure.closed_by.as_deref(),
            closing_notes: closure.notes.as_deref(),
            effectiveness: closure.effectiveness.as_ref().map(EffectivenessVerdict::as_str),
            action_owner: fields.action_owner.as_deref(),
            reopened_at: reopening.reopened_at.map(format_timestamp),
            reopened_by: reopening.reopened_by.as_deref(),
            reopen_reason: reopening.reason.as_deref(),
        }
    }
}

/// Inserts a report row and returns its ID.
pub(crate) fn insert_report_row(
    conn: &mut SqliteConnection,
    row: &NewReportRow<'_>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(reports::table)
        .values(row)
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

/// Attaches evidence to a report under one category.
///
/// Must run inside the caller's transaction.
pub(crate) fn insert_evidence(
    conn: &mut SqliteConnection,
    report_id: i64,
    category: EvidenceCategory,
    uploads: &[EvidenceUpload],
) -> Result<(), PersistenceError> {
    for upload in uploads {
        diesel::insert_into(evidence::table)
            .values((
                evidence::report_id.eq(report_id),
                evidence::category.eq(category.as_str()),
                evidence::filename.eq(upload.filename.as_str()),
                evidence::media_type.eq(upload.media_type.as_str()),
                evidence::content.eq(upload.content.as_slice()),
            ))
            .execute(conn)?;
    }

    debug!(
        report_id,
        category = category.as_str(),
        count = uploads.len(),
        "Attached evidence"
    );
    Ok(())
}

fn insert_new_report(
    conn: &mut SqliteConnection,
    number: &str,
    new_report: &NewReport,
) -> Result<i64, PersistenceError> {
    let closure: ClosureDetails = ClosureDetails::default();
    let reopening: ReopeningDetails = ReopeningDetails::default();
    let row: NewReportRow<'_> = NewReportRow::new(
        Some(number),
        Some(new_report.date),
        &new_report.fields,
        new_report.status,
        &closure,
        &reopening,
    );

    let report_id: i64 = insert_report_row(conn, &row)?;
    insert_evidence(
        conn,
        report_id,
        EvidenceCategory::Opening,
        &new_report.evidence,
    )?;
    Ok(report_id)
}

/// Creates a report under a number the caller already allocated.
///
/// The row and its opening evidence are written in one transaction.
///
/// # Errors
///
/// Returns an error if any insert fails; nothing is written in that case.
pub fn create_report(
    conn: &mut SqliteConnection,
    number: &str,
    new_report: &NewReport,
) -> Result<i64, PersistenceError> {
    let report_id: i64 = conn.transaction::<_, PersistenceError, _>(|conn| {
        insert_new_report(conn, number, new_report)
    })?;

    info!(report_id, number, "Created report");
    Ok(report_id)
}

/// Files a report: allocates the next number for the report's year and
/// creates the report with its opening evidence.
///
/// Allocation and insertion share one `IMMEDIATE` transaction. The write
/// lock is taken before the existing numbers are read, so concurrent filers
/// cannot be handed the same number.
///
/// # Errors
///
/// Returns an error if allocation or any insert fails; nothing is written
/// in that case.
pub fn file_report(
    conn: &mut SqliteConnection,
    new_report: &NewReport,
) -> Result<FiledReport, PersistenceError> {
    let filed: FiledReport = conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let number: String = next_number_for_year(conn, new_report.date.year())?.to_string();
        let id: i64 = insert_new_report(conn, &number, new_report)?;
        Ok(FiledReport { id, number })
    })?;

    info!(
        report_id = filed.id,
        number = %filed.number,
        evidence = new_report.evidence.len(),
        "Filed report"
    );
    Ok(filed)
}
