// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multipart uploads: a JSON part plus any number of files.

use axum::extract::Multipart;
use ncr_domain::EvidenceUpload;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::http_error::HttpError;

/// Name of the part holding file uploads.
pub const FILE_PART: &str = "photo";

/// The decoded contents of a multipart upload.
#[derive(Debug)]
pub struct Upload<T> {
    pub payload: T,
    pub files: Vec<EvidenceUpload>,
}

/// Reads a multipart body.
///
/// The part named `payload_part` is parsed as JSON; when it is absent the
/// payload is `T::default()`. Parts named [`FILE_PART`] become evidence;
/// empty files are dropped and other parts are ignored.
///
/// # Errors
///
/// Returns a 400 if the body is not valid multipart or the JSON part does
/// not parse.
pub async fn read_upload<T>(
    mut multipart: Multipart,
    payload_part: &str,
) -> Result<Upload<T>, HttpError>
where
    T: DeserializeOwned + Default,
{
    let mut payload: Option<T> = None;
    let mut files: Vec<EvidenceUpload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        let name: String = field.name().unwrap_or_default().to_string();
        if name == payload_part {
            let text: String = field
                .text()
                .await
                .map_err(|e| HttpError::bad_request(format!("Unreadable '{name}' part: {e}")))?;
            payload = Some(serde_json::from_str(&text).map_err(|e| {
                HttpError::bad_request(format!("Invalid JSON in '{name}' part: {e}"))
            })?);
        } else if name == FILE_PART {
            let filename: String = field.file_name().unwrap_or("upload").to_string();
            let media_type: String = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let content: Vec<u8> = field
                .bytes()
                .await
                .map_err(|e| HttpError::bad_request(format!("Unreadable file '{filename}': {e}")))?
                .to_vec();
            if content.is_empty() {
                debug!(filename, "Skipping empty file part");
                continue;
            }
            files.push(EvidenceUpload::new(filename, media_type, content));
        } else {
            debug!(part = %name, "Ignoring unknown multipart part");
        }
    }

    Ok(Upload {
        payload: payload.unwrap_or_default(),
        files,
    })
}
