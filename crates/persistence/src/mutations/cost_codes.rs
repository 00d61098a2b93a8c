// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::data_models::CostCodeSummary;
use crate::diesel_schema::cost_codes;
use crate::error::PersistenceError;

/// Adds cost codes, skipping blanks and codes that already exist.
///
/// Candidates are trimmed before insertion. A duplicate (already stored, or
/// repeated within `candidates`) is counted as ignored, never as an error.
///
/// # Errors
///
/// Returns an error if a write fails; no code from this call is kept then.
pub fn add_cost_codes<S: AsRef<str>>(
    conn: &mut SqliteConnection,
    candidates: &[S],
) -> Result<CostCodeSummary, PersistenceError> {
    let summary: CostCodeSummary = conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut summary: CostCodeSummary = CostCodeSummary::default();

        for candidate in candidates {
            let code: &str = candidate.as_ref().trim();
            if code.is_empty() {
                continue;
            }

            summary.attempted += 1;
            let affected: usize = diesel::insert_or_ignore_into(cost_codes::table)
                .values(cost_codes::code.eq(code))
                .execute(conn)?;
            if affected == 0 {
                summary.ignored += 1;
            } else {
                summary.inserted += affected;
            }
        }

        Ok(summary)
    })?;

    info!(
        attempted = summary.attempted,
        inserted = summary.inserted,
        ignored = summary.ignored,
        "Added cost codes"
    );
    Ok(summary)
}
