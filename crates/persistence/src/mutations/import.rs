// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk upsert keyed by report number.
//!
//! Imported numbers are trusted as supplied: no allocation happens here, so
//! an import can restore legacy or non-sequential numbers.

use diesel::SqliteConnection;
use diesel::prelude::*;
use ncr_domain::{
    Category, EffectivenessVerdict, ReportRecord, ReportStatus, Severity, format_date,
    format_timestamp,
};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::data_models::ImportSummary;
use crate::diesel_schema::reports;
use crate::error::PersistenceError;
use crate::mutations::reports::{NewReportRow, insert_report_row};
use crate::queries::reports::load_number_index;

/// Every column an import overwrites on an existing report.
///
/// Absent values are written as NULL so an import restores the record as
/// exchanged.
#[derive(AsChangeset)]
#[diesel(table_name = reports, treat_none_as_null = true)]
struct ImportChangeset<'a> {
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
    closed_at: Option<String>,
    closed_by: Option<&'a str>,
    closing_notes: Option<&'a str>,
    effectiveness: Option<&'static str>,
    action_owner: Option<&'a str>,
    reopened_at: Option<String>,
    reopened_by: Option<&'a str>,
    reopen_reason: Option<&'a str>,
}

impl<'a> From<&'a ReportRecord> for ImportChangeset<'a> {
    fn from(record: &'a ReportRecord) -> Self {
        let fields = &record.fields;
        Self {
            report_date: record.date.map(format_date),
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
            closed_at: record.closure.closed_at.map(format_timestamp),
            closed_by: record.closure.closed_by.as_deref(),
            closing_notes: record.closure.notes.as_deref(),
            effectiveness: record.closure.effectiveness.as_ref().map(EffectivenessVerdict::as_str),
            action_owner: fields.action_owner.as_deref(),
            reopened_at: record.reopening.reopened_at.map(format_timestamp),
            reopened_by: record.reopening.reopened_by.as_deref(),
            reopen_reason: record.reopening.reason.as_deref(),
        }
    }
}

/// Upserts a batch of report records.
///
/// A record whose trimmed number matches a stored report updates that report
/// in place (its ID and number are kept; its status changes only if the
/// record carries one). Any other record is inserted, with status `Open`
/// when none is given. Records inserted earlier in the batch are matched by
/// later ones.
///
/// # Errors
///
/// Returns an error if any write fails; the whole batch is rolled back.
pub fn import_records(
    conn: &mut SqliteConnection,
    records: &[ReportRecord],
) -> Result<ImportSummary, PersistenceError> {
    let summary: ImportSummary = conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut index: HashMap<String, i64> = load_number_index(conn)?;
        let mut summary: ImportSummary = ImportSummary::default();

        for record in records {
            let number: Option<&str> = record
                .number
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty());

            if let Some(report_id) = number.and_then(|n| index.get(n).copied()) {
                diesel::update(reports::table.filter(reports::id.eq(report_id)))
                    .set(ImportChangeset::from(record))
                    .execute(conn)?;
                if let Some(status) = record.status {
                    diesel::update(reports::table.filter(reports::id.eq(report_id)))
                        .set(reports::status.eq(status.as_str()))
                        .execute(conn)?;
                }
                debug!(report_id, number, "Import updated report");
                summary.updated += 1;
            } else {
                let row: NewReportRow<'_> = NewReportRow::new(
                    number,
                    record.date,
                    &record.fields,
                    record.status.unwrap_or(ReportStatus::Open),
                    &record.closure,
                    &record.reopening,
                );
                let report_id: i64 = insert_report_row(conn, &row)?;
                if let Some(number) = number {
                    index.insert(number.to_string(), report_id);
                }
                debug!(report_id, number, "Import inserted report");
                summary.inserted += 1;
            }
        }

        Ok(summary)
    })?;

    info!(
        inserted = summary.inserted,
        updated = summary.updated,
        "Imported report records"
    );
    Ok(summary)
}
