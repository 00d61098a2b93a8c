// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use ncr_domain::{
    Category, EffectivenessVerdict, Evidence, EvidenceCategory, EvidenceUpload, Report,
    ReportStatus, Severity, format_date, format_timestamp,
};
use ncr_notify::Delivery;

/// API request to open a Quality session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct LoginRequest {
    /// The quality password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub session_token: String,
    /// The access level the token grants.
    pub access_level: String,
    /// UTC expiry, `YYYY-MM-DD HH:MM:SS`.
    pub expires_at: String,
}

/// The report fields a user enters when filing.
///
/// Multi-select fields arrive as lists of selected options.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ReportInput {
    /// Report date (`YYYY-MM-DD` or `DD/MM/YYYY`); today when absent.
    pub date: Option<String>,
    pub issuer: Option<String>,
    pub area: Option<String>,
    pub cost_code: Option<String>,
    pub title: Option<String>,
    pub inspector: Option<String>,
    pub description: Option<String>,
    pub references: Option<String>,
    pub cause: Vec<String>,
    pub process: Vec<String>,
    pub origin: Vec<String>,
    pub correction_action: Vec<String>,
    pub severity: Option<String>,
    pub category: Option<String>,
    pub actions: Option<String>,
    pub action_owner: Option<String>,
}

/// API request to file a new report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReportRequest {
    pub report: ReportInput,
    /// Opening evidence.
    pub photos: Vec<EvidenceUpload>,
}

/// Outcome of a best-effort notification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationInfo {
    pub delivered: bool,
    pub message: String,
}

impl From<Delivery> for NotificationInfo {
    fn from(delivery: Delivery) -> Self {
        Self {
            delivered: delivery.delivered,
            message: delivery.message,
        }
    }
}

/// API response for a filed report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FileReportResponse {
    pub report_id: i64,
    pub number: String,
    pub evidence_count: usize,
    pub message: String,
    /// Filled in once the notification has been attempted.
    pub notification: Option<NotificationInfo>,
}

/// API request to close a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct CloseReportRequest {
    pub closed_by: Option<String>,
    pub notes: Option<String>,
    /// Effectiveness verdict label; "to verify" when absent.
    pub effectiveness: Option<String>,
}

/// API request to reopen a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ReopenReportRequest {
    pub reopened_by: Option<String>,
    pub reason: Option<String>,
}

/// API response for a Close or Reopen.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransitionResponse {
    pub report_id: i64,
    pub previous_status: ReportStatus,
    pub status: ReportStatus,
    pub evidence_count: usize,
    pub message: String,
    pub notification: Option<NotificationInfo>,
}

/// Full report information for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportInfo {
    pub id: i64,
    pub number: Option<String>,
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
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
    pub status: ReportStatus,
    pub status_label: String,
    pub closed_at: Option<String>,
    pub closed_by: Option<String>,
    pub closing_notes: Option<String>,
    pub effectiveness: Option<EffectivenessVerdict>,
    pub reopened_at: Option<String>,
    pub reopened_by: Option<String>,
    pub reopen_reason: Option<String>,
}

impl From<Report> for ReportInfo {
    fn from(report: Report) -> Self {
        let fields = report.fields;
        Self {
            id: report.id,
            number: report.number,
            date: report.date.map(format_date),
            issuer: fields.issuer,
            area: fields.area,
            cost_code: fields.cost_code,
            title: fields.title,
            inspector: fields.inspector,
            description: fields.description,
            references: fields.references,
            cause: fields.cause,
            process: fields.process,
            origin: fields.origin,
            correction_action: fields.correction_action,
            severity: fields.severity,
            category: fields.category,
            actions: fields.actions,
            action_owner: fields.action_owner,
            status: report.status,
            status_label: report.status.label().to_string(),
            closed_at: report.closure.closed_at.map(format_timestamp),
            closed_by: report.closure.closed_by,
            closing_notes: report.closure.notes,
            effectiveness: report.closure.effectiveness,
            reopened_at: report.reopening.reopened_at.map(format_timestamp),
            reopened_by: report.reopening.reopened_by,
            reopen_reason: report.reopening.reason,
        }
    }
}

/// Query filters for listing reports.
///
/// `status` and `severity` are comma-separated label lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ListReportsQuery {
    pub status: Option<String>,
    pub severity: Option<String>,
    pub area: Option<String>,
    pub inspector: Option<String>,
    pub cost_code: Option<String>,
}

/// API response listing reports.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListReportsResponse {
    pub reports: Vec<ReportInfo>,
}

/// API response previewing the next report number.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NextNumberResponse {
    pub number: String,
}

/// Evidence metadata.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EvidenceInfo {
    pub id: i64,
    pub category: EvidenceCategory,
    pub filename: String,
    pub media_type: String,
    pub size: usize,
}

impl From<&Evidence> for EvidenceInfo {
    fn from(evidence: &Evidence) -> Self {
        Self {
            id: evidence.id,
            category: evidence.category,
            filename: evidence.filename.clone(),
            media_type: evidence.media_type.clone(),
            size: evidence.content.len(),
        }
    }
}

/// API response listing a report's evidence in one category.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListEvidenceResponse {
    pub report_id: i64,
    pub category: EvidenceCategory,
    pub evidence: Vec<EvidenceInfo>,
}

/// A file handed back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub media_type: String,
    pub content: Vec<u8>,
}

/// API response for a bulk import.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImportResponse {
    pub inserted: usize,
    pub updated: usize,
    /// Rows processed (inserted + updated).
    pub processed: usize,
    pub message: String,
}

/// API response listing cost codes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListCostCodesResponse {
    pub codes: Vec<String>,
}

/// API request to add cost codes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct AddCostCodesRequest {
    pub codes: Vec<String>,
}

/// API response for added cost codes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AddCostCodesResponse {
    /// Non-blank candidates an insert was attempted for.
    pub attempted: usize,
    pub inserted: usize,
    /// Candidates that already existed.
    pub ignored: usize,
}

/// API response for a stored logo.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetLogoResponse {
    pub size: usize,
    pub message: String,
}
