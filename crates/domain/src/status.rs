// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report status states and transition rules.
//!
//! Only two transitions exist: Close (from any non-closed status) and
//! Reopen (from Closed, landing in `InAction`). `UnderReview` and `Blocked`
//! are part of the stored domain so that filters and imported data can carry
//! them, but no transition ever produces them.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Initial status of a freshly filed report.
    Open,
    /// Filter-only status; never produced by a transition.
    UnderReview,
    /// Open-like status entered when a closed report is reopened.
    InAction,
    /// Filter-only status; never produced by a transition.
    Blocked,
    /// The report has been closed.
    Closed,
}

impl ReportStatus {
    /// All statuses, in presentation order.
    pub const ALL: [Self; 5] = [
        Self::Open,
        Self::UnderReview,
        Self::InAction,
        Self::Blocked,
        Self::Closed,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::UnderReview => "under_review",
            Self::InAction => "in_action",
            Self::Blocked => "blocked",
            Self::Closed => "closed",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::UnderReview => "Under Review",
            Self::InAction => "In Action",
            Self::Blocked => "Blocked",
            Self::Closed => "Closed",
        }
    }

    /// Parses a status from its stored form, its label, or the legacy label
    /// used by older exports.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is not a known status.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let key: String = s.trim().to_lowercase().replace(' ', "_");
        match key.as_str() {
            "open" | "aberta" => Ok(Self::Open),
            "under_review" | "em_análise" | "em_analise" => Ok(Self::UnderReview),
            "in_action" | "em_ação" | "em_acao" => Ok(Self::InAction),
            "blocked" | "bloqueada" => Ok(Self::Blocked),
            "closed" | "encerrada" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if the report is closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Validates that a report in this status may be closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the report is already closed.
    pub fn validate_close(&self) -> Result<(), DomainError> {
        if self.is_closed() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: Self::Closed.as_str().to_string(),
                reason: "report is already closed".to_string(),
            });
        }
        Ok(())
    }

    /// Validates that a report in this status may be reopened.
    ///
    /// # Errors
    ///
    /// Returns an error if the report is not closed.
    pub fn validate_reopen(&self) -> Result<(), DomainError> {
        if !self.is_closed() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: Self::InAction.as_str().to_string(),
                reason: "only closed reports can be reopened".to_string(),
            });
        }
        Ok(())
    }
}

impl FromStr for ReportStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
