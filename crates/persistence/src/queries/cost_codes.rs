// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::cost_codes;
use crate::error::PersistenceError;

/// Lists every cost code in lexicographic order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_cost_codes(conn: &mut SqliteConnection) -> Result<Vec<String>, PersistenceError> {
    debug!("Listing cost codes");
    Ok(cost_codes::table
        .select(cost_codes::code)
        .order(cost_codes::code.asc())
        .load(conn)?)
}
