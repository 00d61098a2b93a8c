// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ncr_domain::{ReportStatus, Severity};

/// The identity of a freshly filed report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiledReport {
    pub id: i64,
    pub number: String,
}

/// Filters applied when listing reports.
///
/// Empty sets and absent text match everything. Text filters are
/// case-insensitive substring matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub statuses: Vec<ReportStatus>,
    pub severities: Vec<Severity>,
    pub area: Option<String>,
    pub inspector: Option<String>,
    pub cost_code: Option<String>,
}

/// Outcome of adding cost codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostCodeSummary {
    /// Non-blank candidates an insert was attempted for.
    pub attempted: usize,
    /// Codes actually stored.
    pub inserted: usize,
    /// Candidates skipped because the code already existed.
    pub ignored: usize,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
}

impl ImportSummary {
    /// Returns the number of rows processed.
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.inserted + self.updated
    }
}

/// The stored branding image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub content: Vec<u8>,
    pub media_type: Option<String>,
}

/// A stored session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub access_level: String,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}
