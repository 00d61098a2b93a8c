// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! Every request acts with an access level. A request carrying a valid
//! `Authorization: Bearer <token>` header acts as Quality; anything else
//! acts as a visitor.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use ncr_api::{AccessLevel, AuthenticationService};
use tracing::{debug, warn};

use crate::AppState;

fn bearer_token(parts: &Parts) -> Result<Option<&str>, SessionError> {
    let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value: &str = value.to_str().map_err(|_| {
        warn!("Invalid Authorization header encoding");
        SessionError::InvalidAuthorizationHeader
    })?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .map(Some)
        .ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })
}

/// Extractor for the access level a request acts with.
///
/// Never rejects: a missing, malformed, unknown or expired token resolves
/// to [`AccessLevel::Visitor`].
pub struct RequestAccess(pub AccessLevel);

impl FromRequestParts<AppState> for RequestAccess {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: Option<&str> = bearer_token(parts).unwrap_or_default();
        let mut persistence = state.persistence.lock().await;
        let level: AccessLevel = AuthenticationService::access_level(&mut persistence, token);
        drop(persistence);

        debug!(access = level.as_str(), "Resolved request access level");
        Ok(Self(level))
    }
}

/// Extractor for the raw bearer token, used to end a session.
pub struct BearerToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = SessionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_token(parts)?
            .filter(|t| !t.is_empty())
            .map(|t| Self(t.to_string()))
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: &str = match self {
            Self::MissingAuthorizationHeader => "Missing Authorization header",
            Self::InvalidAuthorizationHeader => {
                "Invalid Authorization header format. Expected: 'Bearer <token>'"
            }
        };

        crate::http_error::HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
        }
        .into_response()
    }
}
