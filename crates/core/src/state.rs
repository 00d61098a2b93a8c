// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ncr_domain::{
    EffectivenessVerdict, EvidenceCategory, EvidenceUpload, ReportFields, ReportStatus,
};
use time::{Date, PrimitiveDateTime};

/// A report ready to be filed.
///
/// The number is not part of this value: it is allocated by the store in the
/// same transaction that inserts the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    /// The report date; its year selects the numbering sequence.
    pub date: Date,
    /// The normalized descriptive fields.
    pub fields: ReportFields,
    /// The initial status (always `Open`).
    pub status: ReportStatus,
    /// Evidence attached under the Opening category.
    pub evidence: Vec<EvidenceUpload>,
}

/// Values written by a Close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseRecord {
    pub closed_at: PrimitiveDateTime,
    pub closed_by: Option<String>,
    pub notes: Option<String>,
    pub effectiveness: EffectivenessVerdict,
}

/// Values written by a Reopen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReopenRecord {
    pub reopened_at: PrimitiveDateTime,
    pub reopened_by: Option<String>,
    pub reason: Option<String>,
}

/// The field changes a lifecycle transition makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleChange {
    Close(CloseRecord),
    Reopen(ReopenRecord),
}

impl LifecycleChange {
    /// Returns the status the report holds after this change.
    #[must_use]
    pub const fn new_status(&self) -> ReportStatus {
        match self {
            Self::Close(_) => ReportStatus::Closed,
            Self::Reopen(_) => ReportStatus::InAction,
        }
    }

    /// Returns the category under which this change's evidence is stored.
    #[must_use]
    pub const fn evidence_category(&self) -> EvidenceCategory {
        match self {
            Self::Close(_) => EvidenceCategory::Closing,
            Self::Reopen(_) => EvidenceCategory::Reopening,
        }
    }
}

/// The result of applying a command to a report.
///
/// Nothing is written until the store persists this value; persistence must
/// apply the field changes and the evidence together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The report the transition applies to.
    pub report_id: i64,
    /// The status the report held when the command was validated.
    pub previous_status: ReportStatus,
    /// The field changes.
    pub change: LifecycleChange,
    /// Evidence to attach under `change.evidence_category()`.
    pub evidence: Vec<EvidenceUpload>,
}

impl TransitionResult {
    /// Returns the status the report holds after this transition.
    #[must_use]
    pub const fn new_status(&self) -> ReportStatus {
        self.change.new_status()
    }
}
