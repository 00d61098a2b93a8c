// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use ncr_domain::{
    Category, ClosureDetails, EffectivenessVerdict, ReopeningDetails, Report, ReportFields,
    ReportNumber, ReportStatus, Severity, next_report_number, parse_date, parse_timestamp,
};
use std::collections::HashMap;
use tracing::debug;

use crate::data_models::ReportFilter;
use crate::diesel_schema::reports;
use crate::error::PersistenceError;

/// Diesel Queryable struct for report rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = reports)]
struct ReportRow {
    id: i64,
    number: Option<String>,
    report_date: Option<String>,
    issuer: Option<String>,
    area: Option<String>,
    cost_code: Option<String>,
    title: Option<String>,
    inspector: Option<String>,
    description: Option<String>,
    report_references: Option<String>,
    cause: Option<String>,
    process: Option<String>,
    origin: Option<String>,
    correction_action: Option<String>,
    severity: Option<String>,
    category: Option<String>,
    actions: Option<String>,
    status: String,
    closed_at: Option<String>,
    closed_by: Option<String>,
    closing_notes: Option<String>,
    effectiveness: Option<String>,
    action_owner: Option<String>,
    reopened_at: Option<String>,
    reopened_by: Option<String>,
    reopen_reason: Option<String>,
}

fn corrupt(id: i64, err: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::CorruptRecord(format!("report {id}: {err}"))
}

impl ReportRow {
    fn into_report(self) -> Result<Report, PersistenceError> {
        let id: i64 = self.id;
        let status: ReportStatus = ReportStatus::parse(&self.status).map_err(|e| corrupt(id, e))?;
        let severity: Option<Severity> = self
            .severity
            .as_deref()
            .map(Severity::parse)
            .transpose()
            .map_err(|e| corrupt(id, e))?;
        let category: Option<Category> = self
            .category
            .as_deref()
            .map(Category::parse)
            .transpose()
            .map_err(|e| corrupt(id, e))?;
        let effectiveness: Option<EffectivenessVerdict> = self
            .effectiveness
            .as_deref()
            .map(EffectivenessVerdict::parse)
            .transpose()
            .map_err(|e| corrupt(id, e))?;

        Ok(Report {
            id,
            number: self.number,
            date: self.report_date.as_deref().and_then(parse_date),
            fields: ReportFields {
                issuer: self.issuer,
                area: self.area,
                cost_code: self.cost_code,
                title: self.title,
                inspector: self.inspector,
                description: self.description,
                references: self.report_references,
                cause: self.cause,
                process: self.process,
                origin: self.origin,
                correction_action: self.correction_action,
                severity,
                category,
                actions: self.actions,
                action_owner: self.action_owner,
            },
            status,
            closure: ClosureDetails {
                closed_at: self.closed_at.as_deref().and_then(parse_timestamp),
                closed_by: self.closed_by,
                notes: self.closing_notes,
                effectiveness,
            },
            reopening: ReopeningDetails {
                reopened_at: self.reopened_at.as_deref().and_then(parse_timestamp),
                reopened_by: self.reopened_by,
                reason: self.reopen_reason,
            },
        })
    }
}

/// Escapes `LIKE` wildcards so user text matches literally.
fn like_pattern(needle: &str) -> String {
    let escaped: String = needle
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Lists every report, most recently created first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn list_reports(conn: &mut SqliteConnection) -> Result<Vec<Report>, PersistenceError> {
    list_reports_filtered(conn, &ReportFilter::default())
}

/// Lists reports matching a filter, most recently created first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row cannot be decoded.
pub fn list_reports_filtered(
    conn: &mut SqliteConnection,
    filter: &ReportFilter,
) -> Result<Vec<Report>, PersistenceError> {
    debug!(?filter, "Listing reports");

    let mut query = reports::table
        .select(ReportRow::as_select())
        .order(reports::id.desc())
        .into_boxed();

    if !filter.statuses.is_empty() {
        let labels: Vec<&str> = filter.statuses.iter().map(ReportStatus::as_str).collect();
        query = query.filter(reports::status.eq_any(labels));
    }
    if !filter.severities.is_empty() {
        let labels: Vec<&str> = filter.severities.iter().map(Severity::as_str).collect();
        query = query.filter(reports::severity.eq_any(labels));
    }
    if let Some(area) = filter.area.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(reports::area.like(like_pattern(area)).escape('\\'));
    }
    if let Some(inspector) = filter.inspector.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(reports::inspector.like(like_pattern(inspector)).escape('\\'));
    }
    if let Some(cost_code) = filter.cost_code.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(reports::cost_code.like(like_pattern(cost_code)).escape('\\'));
    }

    let rows: Vec<ReportRow> = query.load(conn)?;
    rows.into_iter().map(ReportRow::into_report).collect()
}

/// Retrieves a report by ID.
///
/// # Errors
///
/// Returns `PersistenceError::ReportNotFound` if no such report exists.
pub fn get_report(conn: &mut SqliteConnection, report_id: i64) -> Result<Report, PersistenceError> {
    debug!(report_id, "Looking up report");

    let row: ReportRow = reports::table
        .filter(reports::id.eq(report_id))
        .select(ReportRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::ReportNotFound(report_id))?;

    row.into_report()
}

/// Returns true if a report with this ID exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn report_exists(
    conn: &mut SqliteConnection,
    report_id: i64,
) -> Result<bool, PersistenceError> {
    use diesel::dsl::{exists, select};

    Ok(select(exists(reports::table.filter(reports::id.eq(report_id)))).get_result(conn)?)
}

/// Loads every stored report number that could belong to `year`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_numbers_for_year(
    conn: &mut SqliteConnection,
    year: i32,
) -> Result<Vec<String>, PersistenceError> {
    let numbers: Vec<Option<String>> = reports::table
        .filter(reports::number.like(format!("%{year}-%")))
        .select(reports::number)
        .load(conn)?;

    Ok(numbers.into_iter().flatten().collect())
}

/// Computes the number the next report filed in `year` would receive.
///
/// # Errors
///
/// Returns an error if the query fails or the year cannot carry a number.
pub fn next_number_for_year(
    conn: &mut SqliteConnection,
    year: i32,
) -> Result<ReportNumber, PersistenceError> {
    let existing: Vec<String> = load_numbers_for_year(conn, year)?;
    let next: ReportNumber = next_report_number(year, existing.iter().map(String::as_str))?;
    debug!(year, next = %next, "Computed next report number");
    Ok(next)
}

/// Maps every non-blank stored number to the ID of the newest report
/// carrying it.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_number_index(
    conn: &mut SqliteConnection,
) -> Result<HashMap<String, i64>, PersistenceError> {
    let rows: Vec<(i64, Option<String>)> = reports::table
        .filter(reports::number.is_not_null())
        .select((reports::id, reports::number))
        .order(reports::id.asc())
        .load(conn)?;

    let mut index: HashMap<String, i64> = HashMap::new();
    for (id, number) in rows {
        if let Some(number) = number {
            let key: &str = number.trim();
            if !key.is_empty() {
                index.insert(key.to_string(), id);
            }
        }
    }
    Ok(index)
}
