// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use ncr_domain::{format_timestamp, parse_timestamp};
use ncr_persistence::{PersistenceError, SessionData, SqlitePersistence};
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// Access levels for authorization.
///
/// The level travels with each request; there is no ambient "logged in"
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// Quality staff: may file, close and reopen reports, import data,
    /// manage cost codes and upload the logo.
    Quality,
    /// Anyone else: may list, view, print and export.
    Visitor,
}

impl AccessLevel {
    /// Returns the persisted representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Visitor => "visitor",
        }
    }

    /// Parses a persisted access level.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "quality" => Some(Self::Quality),
            "visitor" => Some(Self::Visitor),
            _ => None,
        }
    }
}

/// The credential that grants the Quality access level.
///
/// Only a bcrypt hash of the password is kept in memory.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    quality_hash: String,
}

impl AccessPolicy {
    /// Hashes the quality password with the default bcrypt cost.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails.
    pub fn new(quality_password: &str) -> Result<Self, AuthError> {
        Self::with_cost(quality_password, bcrypt::DEFAULT_COST)
    }

    /// Hashes the quality password with an explicit bcrypt cost.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the cost is out of range.
    pub fn with_cost(quality_password: &str, cost: u32) -> Result<Self, AuthError> {
        let quality_hash: String =
            bcrypt::hash(quality_password, cost).map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to hash quality password: {e}"),
            })?;
        Ok(Self { quality_hash })
    }

    /// Returns `true` if `password` is the quality password.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.quality_hash).unwrap_or(false)
    }
}

/// Authentication service for session management.
pub struct AuthenticationService;

impl AuthenticationService {
    /// How long a Quality session stays valid.
    pub const SESSION_LIFETIME: Duration = Duration::hours(12);

    /// Checks the quality password and opens a session.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `expires_at`), the expiry formatted as a
    /// UTC `YYYY-MM-DD HH:MM:SS` timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the password is wrong or the session cannot be
    /// stored.
    pub fn login(
        persistence: &mut SqlitePersistence,
        policy: &AccessPolicy,
        password: &str,
    ) -> Result<(String, String), AuthError> {
        if !policy.verify(password) {
            warn!("Rejected quality login: wrong password");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Incorrect password"),
            });
        }

        let session_token: String = Self::generate_session_token();
        let expires_at: String = format_timestamp(Self::now_utc() + Self::SESSION_LIFETIME);

        persistence
            .create_session(&session_token, AccessLevel::Quality.as_str(), &expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        let purged: usize = persistence.delete_expired_sessions().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to purge expired sessions");
            0
        });
        info!(expires_at, purged, "Quality session opened");

        Ok((session_token, expires_at))
    }

    /// Validates a session token and returns its access level.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown, expired or malformed.
    pub fn validate_session(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<AccessLevel, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: PrimitiveDateTime =
            parse_timestamp(&session.expires_at).ok_or_else(|| AuthError::AuthenticationFailed {
                reason: format!(
                    "Failed to parse session expiration '{}'",
                    session.expires_at
                ),
            })?;
        if Self::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let level: AccessLevel = AccessLevel::parse(&session.access_level).ok_or_else(|| {
            AuthError::AuthenticationFailed {
                reason: format!("Invalid access level: {}", session.access_level),
            }
        })?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok(level)
    }

    /// Resolves the access level a request acts with.
    ///
    /// A missing, unknown or expired token yields [`AccessLevel::Visitor`].
    pub fn access_level(
        persistence: &mut SqlitePersistence,
        session_token: Option<&str>,
    ) -> AccessLevel {
        let Some(token) = session_token.filter(|t| !t.is_empty()) else {
            return AccessLevel::Visitor;
        };
        match Self::validate_session(persistence, token) {
            Ok(level) => level,
            Err(e) => {
                debug!(error = %e, "Treating request as visitor");
                AccessLevel::Visitor
            }
        }
    }

    /// Logs out by deleting the session.
    ///
    /// Logging out an unknown token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn logout(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<(), AuthError> {
        let removed: usize = persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;
        info!(removed, "Session closed");
        Ok(())
    }

    fn now_utc() -> PrimitiveDateTime {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        PrimitiveDateTime::new(now.date(), now.time())
    }

    fn generate_session_token() -> String {
        format!(
            "{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}

/// Authorization service for enforcing access levels.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that a request acts with the Quality access level.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` for visitors.
    pub fn require_quality(access: AccessLevel, action: &str) -> Result<(), AuthError> {
        match access {
            AccessLevel::Quality => Ok(()),
            AccessLevel::Visitor => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_level: String::from("Quality"),
            }),
        }
    }
}
