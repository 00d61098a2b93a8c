// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use ncr_domain::{Evidence, EvidenceCategory};
use tracing::debug;

use crate::diesel_schema::evidence;
use crate::error::PersistenceError;

/// Diesel Queryable struct for evidence rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = evidence)]
struct EvidenceRow {
    id: i64,
    report_id: i64,
    category: String,
    filename: String,
    media_type: String,
    content: Vec<u8>,
}

impl EvidenceRow {
    fn into_evidence(self) -> Result<Evidence, PersistenceError> {
        let category: EvidenceCategory = EvidenceCategory::parse(&self.category)
            .map_err(|e| PersistenceError::CorruptRecord(format!("evidence {}: {e}", self.id)))?;
        Ok(Evidence {
            id: self.id,
            report_id: self.report_id,
            category,
            filename: self.filename,
            media_type: self.media_type,
            content: self.content,
        })
    }
}

/// Lists a report's evidence in one category, in creation order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_evidence(
    conn: &mut SqliteConnection,
    report_id: i64,
    category: EvidenceCategory,
) -> Result<Vec<Evidence>, PersistenceError> {
    debug!(report_id, category = category.as_str(), "Listing evidence");

    let rows: Vec<EvidenceRow> = evidence::table
        .filter(evidence::report_id.eq(report_id))
        .filter(evidence::category.eq(category.as_str()))
        .select(EvidenceRow::as_select())
        .order(evidence::id.asc())
        .load(conn)?;

    rows.into_iter().map(EvidenceRow::into_evidence).collect()
}

/// Retrieves a single evidence item.
///
/// The item must belong to the given report and category.
///
/// # Errors
///
/// Returns `PersistenceError::EvidenceNotFound` if no matching item exists.
pub fn get_evidence(
    conn: &mut SqliteConnection,
    report_id: i64,
    category: EvidenceCategory,
    evidence_id: i64,
) -> Result<Evidence, PersistenceError> {
    let row: EvidenceRow = evidence::table
        .filter(evidence::id.eq(evidence_id))
        .filter(evidence::report_id.eq(report_id))
        .filter(evidence::category.eq(category.as_str()))
        .select(EvidenceRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::EvidenceNotFound {
            report_id,
            evidence_id,
        })?;

    row.into_evidence()
}
