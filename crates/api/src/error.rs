// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use ncr::CoreError;
use ncr_domain::DomainError;
use ncr_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The access level required for this action.
        required_level: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_level,
            } => {
                write!(
                    f,
                    "Unauthorized: '{action}' requires {required_level} access"
                )
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the request lacks the required access level.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The access level required for this action.
        required_level: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_level,
            } => {
                write!(
                    f,
                    "Unauthorized: '{action}' requires {required_level} access"
                )
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_level,
            } => Self::Unauthorized {
                action,
                required_level,
            },
        }
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidReportNumber(_) => invalid_input("number", &err),
        DomainError::InvalidYear(_) => invalid_input("date", &err),
        DomainError::InvalidStatus { .. } => invalid_input("status", &err),
        DomainError::InvalidSeverity(_) => invalid_input("severity", &err),
        DomainError::InvalidCategory(_) => invalid_input("category", &err),
        DomainError::InvalidEffectiveness(_) => invalid_input("effectiveness", &err),
        DomainError::InvalidEvidenceCategory(_) => invalid_input("evidence_category", &err),
        DomainError::InvalidClassification { field, .. } => {
            invalid_input(&field.label().replace(' ', "_"), &err)
        }
        DomainError::MissingRequiredField { field } => invalid_input(field, &err),
        DomainError::SequenceExhausted { .. } => ApiError::DomainRuleViolation {
            rule: String::from("report_numbering"),
            message: err.to_string(),
        },
        DomainError::InvalidStatusTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ReportNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Report"),
            message: format!("Report {id} does not exist"),
        },
        PersistenceError::EvidenceNotFound {
            report_id,
            evidence_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Evidence"),
            message: format!("Evidence {evidence_id} does not exist for report {report_id}"),
        },
        PersistenceError::StatusChanged { report_id } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message: format!("Report {report_id} changed status while the request was processed"),
        },
        PersistenceError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
