// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::diesel_schema::settings;
use crate::error::PersistenceError;
use crate::queries::settings::LOGO_KEY;

/// Stores the branding image, replacing any previous one.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn set_logo(
    conn: &mut SqliteConnection,
    content: &[u8],
    media_type: Option<&str>,
) -> Result<(), PersistenceError> {
    diesel::replace_into(settings::table)
        .values((
            settings::key.eq(LOGO_KEY),
            settings::blob.eq(Some(content)),
            settings::text.eq(media_type),
        ))
        .execute(conn)?;

    info!(bytes = content.len(), "Stored logo");
    Ok(())
}
