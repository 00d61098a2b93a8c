// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ncr_domain::{EffectivenessVerdict, EvidenceUpload};

/// A command represents user intent to move a report through its lifecycle.
///
/// Commands are the only way to change a report's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Close a report.
    Close {
        /// Who closed the report.
        closed_by: Option<String>,
        /// Closing notes.
        notes: Option<String>,
        /// Verdict on whether the corrective action worked.
        effectiveness: EffectivenessVerdict,
        /// Closing evidence.
        evidence: Vec<EvidenceUpload>,
    },
    /// Reopen a closed report.
    Reopen {
        /// Who reopened the report.
        reopened_by: Option<String>,
        /// Why the report was reopened.
        reason: Option<String>,
        /// Reopening evidence.
        evidence: Vec<EvidenceUpload>,
    },
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Close { .. } => "Close",
            Self::Reopen { .. } => "Reopen",
        }
    }
}
