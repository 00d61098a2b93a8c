// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::ReportStatus;
use crate::types::{Category, EffectivenessVerdict, EvidenceCategory, Severity};
use time::{Date, PrimitiveDateTime};

/// Trims a free-text value, treating blank text as absent.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed: &str = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// The descriptive fields of a report.
///
/// These are the fields supplied when a report is filed and overwritten by a
/// bulk import. Multi-valued classification fields hold their selections
/// joined with `"; "`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFields {
    pub issuer: Option<String>,
    pub area: Option<String>,
    pub cost_code: Option<String>,
    pub title: Option<String>,
    pub inspector: Option<String>,
    pub description: Option<String>,
    pub references: Option<String>,
    pub cause: Option<String>,
    pub process: Option<String>,
    pub origin: Option<String>,
    pub correction_action: Option<String>,
    pub severity: Option<Severity>,
    pub category: Option<Category>,
    pub actions: Option<String>,
    pub action_owner: Option<String>,
}

impl ReportFields {
    /// Returns these fields with every text value trimmed and blank values
    /// replaced by `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            issuer: non_empty(self.issuer),
            area: non_empty(self.area),
            cost_code: non_empty(self.cost_code),
            title: non_empty(self.title),
            inspector: non_empty(self.inspector),
            description: non_empty(self.description),
            references: non_empty(self.references),
            cause: non_empty(self.cause),
            process: non_empty(self.process),
            origin: non_empty(self.origin),
            correction_action: non_empty(self.correction_action),
            severity: self.severity,
            category: self.category,
            actions: non_empty(self.actions),
            action_owner: non_empty(self.action_owner),
        }
    }

    /// Returns the title, or an empty string when absent.
    #[must_use]
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

/// Details recorded by the most recent Close.
///
/// These survive a later Reopen; the record keeps only the last cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureDetails {
    pub closed_at: Option<PrimitiveDateTime>,
    pub closed_by: Option<String>,
    pub notes: Option<String>,
    pub effectiveness: Option<EffectivenessVerdict>,
}

/// Details recorded by the most recent Reopen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReopeningDetails {
    pub reopened_at: Option<PrimitiveDateTime>,
    pub reopened_by: Option<String>,
    pub reason: Option<String>,
}

/// A non-conformance report as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Surrogate identifier assigned by the store.
    pub id: i64,
    /// Report number (`YYYY-NNN`). Imported rows may carry any value or none.
    pub number: Option<String>,
    pub date: Option<Date>,
    pub fields: ReportFields,
    pub status: ReportStatus,
    pub closure: ClosureDetails,
    pub reopening: ReopeningDetails,
}

/// A report row as exchanged in tabular form.
///
/// Unlike `Report`, every lifecycle value is optional and the number is
/// trusted as supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRecord {
    pub number: Option<String>,
    pub date: Option<Date>,
    pub fields: ReportFields,
    pub status: Option<ReportStatus>,
    pub closure: ClosureDetails,
    pub reopening: ReopeningDetails,
}

impl From<Report> for ReportRecord {
    fn from(report: Report) -> Self {
        Self {
            number: report.number,
            date: report.date,
            fields: report.fields,
            status: Some(report.status),
            closure: report.closure,
            reopening: report.reopening,
        }
    }
}

/// An image attached to a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    pub id: i64,
    pub report_id: i64,
    pub category: EvidenceCategory,
    pub filename: String,
    pub media_type: String,
    pub content: Vec<u8>,
}

/// An image about to be attached to a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceUpload {
    pub filename: String,
    pub media_type: String,
    pub content: Vec<u8>,
}

impl EvidenceUpload {
    /// Creates a new upload.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        media_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            media_type: media_type.into(),
            content,
        }
    }
}
