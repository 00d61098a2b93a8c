// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::Logo;
use crate::diesel_schema::settings;
use crate::error::PersistenceError;

/// Settings key holding the branding image.
pub const LOGO_KEY: &str = "logo";

/// Retrieves the stored logo, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_logo(conn: &mut SqliteConnection) -> Result<Option<Logo>, PersistenceError> {
    let row: Option<(Option<Vec<u8>>, Option<String>)> = settings::table
        .filter(settings::key.eq(LOGO_KEY))
        .select((settings::blob, settings::text))
        .first(conn)
        .optional()?;

    Ok(row.and_then(|(blob, media_type)| {
        blob.filter(|content| !content.is_empty())
            .map(|content| Logo {
                content,
                media_type,
            })
    }))
}
