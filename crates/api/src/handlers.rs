// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers are synchronous and take the store handle explicitly. Operations
//! that notify return the message to send in [`ApiResult::notification`];
//! the caller delivers it once the store is no longer needed.

use ncr::{Command, NewReport, TransitionResult, apply, file};
use ncr_document::{document_filename, render_report};
use ncr_domain::{
    Category, EffectivenessVerdict, Evidence, EvidenceCategory, EvidenceUpload, Report,
    ReportFields, ReportNumber, ReportStatus, Severity, format_date, join_selections, parse_date,
    validate_report_fields,
};
use ncr_notify::{
    ClosedReport, Message, Notifier, OpenedReport, closed_message, opened_message,
};
use ncr_persistence::{
    CostCodeSummary, FiledReport, ImportSummary, Logo, ReportFilter, SqlitePersistence,
};
use time::{Date, PrimitiveDateTime};
use tracing::{debug, info};

use crate::auth::{AccessLevel, AccessPolicy, AuthenticationService, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::exchange::{export_reports_csv, parse_cost_code_csv, parse_report_csv};
use crate::request_response::{
    AddCostCodesRequest, AddCostCodesResponse, CloseReportRequest, Download, EvidenceInfo,
    FileReportRequest, FileReportResponse, ImportResponse, ListCostCodesResponse,
    ListEvidenceResponse, ListReportsQuery, ListReportsResponse, LoginRequest, LoginResponse,
    NextNumberResponse, NotificationInfo, ReopenReportRequest, ReportInfo, ReportInput,
    SetLogoResponse, TransitionResponse,
};

/// Download name of the CSV export.
pub const EXPORT_FILENAME: &str = "ncr_export.csv";

/// The result of an API operation that may trigger a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The message to deliver, if the operation notifies.
    pub notification: Option<Message>,
}

/// Delivers an operation's notification, if it has one.
///
/// Delivery failures are reported, never raised.
pub async fn deliver(notifier: &Notifier, message: Option<&Message>) -> Option<NotificationInfo> {
    match message {
        Some(message) => Some(notifier.send(message).await.into()),
        None => None,
    }
}

// ============================================================================
// Sessions
// ============================================================================

/// Opens a Quality session.
///
/// # Errors
///
/// Returns an error if the password is wrong or the session cannot be
/// stored.
pub fn login(
    persistence: &mut SqlitePersistence,
    policy: &AccessPolicy,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, expires_at): (String, String) =
        AuthenticationService::login(persistence, policy, &request.password)?;

    Ok(LoginResponse {
        session_token,
        access_level: AccessLevel::Quality.as_str().to_string(),
        expires_at,
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut SqlitePersistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

// ============================================================================
// Reports
// ============================================================================

fn parse_label_list<T>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Result<T, ncr_domain::DomainError>,
) -> Result<Vec<T>, ApiError> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse(s).map_err(translate_domain_error))
        .collect()
}

/// Lists reports, most recently created first, applying any filters.
///
/// # Errors
///
/// Returns an error if a filter label is unknown or the query fails.
pub fn list_reports(
    persistence: &mut SqlitePersistence,
    query: &ListReportsQuery,
) -> Result<ListReportsResponse, ApiError> {
    let filter = ReportFilter {
        statuses: parse_label_list(query.status.as_deref(), ReportStatus::parse)?,
        severities: parse_label_list(query.severity.as_deref(), Severity::parse)?,
        area: query.area.clone(),
        inspector: query.inspector.clone(),
        cost_code: query.cost_code.clone(),
    };

    let reports: Vec<Report> = persistence
        .list_reports_filtered(&filter)
        .map_err(translate_persistence_error)?;
    debug!(count = reports.len(), "Listed reports");

    Ok(ListReportsResponse {
        reports: reports.into_iter().map(ReportInfo::from).collect(),
    })
}

fn resolve_date(raw: Option<&str>, today: Date) -> Result<Date, ApiError> {
    match raw.map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(today),
        Some(value) => parse_date(value).ok_or_else(|| ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("'{value}' is not a date (expected YYYY-MM-DD or DD/MM/YYYY)"),
        }),
    }
}

/// Previews the number the next report filed on `date` would receive.
///
/// # Errors
///
/// Returns an error if the date does not parse or the query fails.
pub fn next_number(
    persistence: &mut SqlitePersistence,
    date: Option<&str>,
    today: Date,
) -> Result<NextNumberResponse, ApiError> {
    let date: Date = resolve_date(date, today)?;
    let number: ReportNumber = persistence
        .next_report_number(date.year())
        .map_err(translate_persistence_error)?;
    Ok(NextNumberResponse {
        number: number.to_string(),
    })
}

fn parse_optional<T>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Result<T, ncr_domain::DomainError>,
) -> Result<Option<T>, ApiError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse(s).map_err(translate_domain_error))
        .transpose()
}

fn fields_from_input(input: ReportInput) -> Result<ReportFields, ApiError> {
    Ok(ReportFields {
        severity: parse_optional(input.severity.as_deref(), Severity::parse)?,
        category: parse_optional(input.category.as_deref(), Category::parse)?,
        cause: join_selections(&input.cause),
        process: join_selections(&input.process),
        origin: join_selections(&input.origin),
        correction_action: join_selections(&input.correction_action),
        issuer: input.issuer,
        area: input.area,
        cost_code: input.cost_code,
        title: input.title,
        inspector: input.inspector,
        description: input.description,
        references: input.references,
        actions: input.actions,
        action_owner: input.action_owner,
    })
}

fn or_empty(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}

/// Files a new report with its opening evidence.
///
/// The number is allocated by the store in the same transaction as the
/// insert. The returned notification announces the new report.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not act with the Quality access level
/// - The date, severity or category does not parse
/// - The title is blank or a multi-select value is not an option
/// - The store fails
pub fn file_report(
    persistence: &mut SqlitePersistence,
    access: AccessLevel,
    request: FileReportRequest,
    today: Date,
    base_url: &str,
) -> Result<ApiResult<FileReportResponse>, ApiError> {
    AuthorizationService::require_quality(access, "file_report")?;

    let date: Date = resolve_date(request.report.date.as_deref(), today)?;
    let fields: ReportFields = fields_from_input(request.report)?;
    let new_report: NewReport = file(date, fields, request.photos);
    validate_report_fields(&new_report.fields).map_err(translate_domain_error)?;

    let filed: FiledReport = persistence
        .file_report(&new_report)
        .map_err(translate_persistence_error)?;

    let fields = &new_report.fields;
    let date_text: String = format_date(date);
    let notification: Message = opened_message(
        &OpenedReport {
            number: &filed.number,
            date: &date_text,
            issuer: or_empty(fields.issuer.as_deref()),
            area: or_empty(fields.area.as_deref()),
            cost_code: or_empty(fields.cost_code.as_deref()),
            title: fields.title_or_empty(),
            severity: fields.severity.as_ref().map_or("", Severity::label),
            category: fields.category.as_ref().map_or("", Category::label),
        },
        base_url,
    );

    Ok(ApiResult {
        response: FileReportResponse {
            report_id: filed.id,
            message: format!("Report {} filed", filed.number),
            number: filed.number,
            evidence_count: new_report.evidence.len(),
            notification: None,
        },
        notification: Some(notification),
    })
}

/// Retrieves a report.
///
/// # Errors
///
/// Returns an error if the report does not exist or the query fails.
pub fn get_report(
    persistence: &mut SqlitePersistence,
    report_id: i64,
) -> Result<ReportInfo, ApiError> {
    persistence
        .get_report(report_id)
        .map(ReportInfo::from)
        .map_err(translate_persistence_error)
}

fn run_transition(
    persistence: &mut SqlitePersistence,
    report: &Report,
    command: Command,
    now: PrimitiveDateTime,
) -> Result<TransitionResult, ApiError> {
    let result: TransitionResult = apply(report, command, now).map_err(translate_core_error)?;
    persistence
        .apply_transition(&result)
        .map_err(translate_persistence_error)?;
    Ok(result)
}

fn transition_response(result: &TransitionResult, message: String) -> TransitionResponse {
    TransitionResponse {
        report_id: result.report_id,
        previous_status: result.previous_status,
        status: result.new_status(),
        evidence_count: result.evidence.len(),
        message,
        notification: None,
    }
}

/// Closes a report, attaching closing evidence.
///
/// The returned notification announces the closure.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not act with the Quality access level
/// - The report does not exist or is already closed
/// - The effectiveness verdict does not parse
/// - The store fails
pub fn close_report(
    persistence: &mut SqlitePersistence,
    access: AccessLevel,
    report_id: i64,
    request: CloseReportRequest,
    evidence: Vec<EvidenceUpload>,
    now: PrimitiveDateTime,
    base_url: &str,
) -> Result<ApiResult<TransitionResponse>, ApiError> {
    AuthorizationService::require_quality(access, "close_report")?;

    let effectiveness: EffectivenessVerdict =
        parse_optional(request.effectiveness.as_deref(), EffectivenessVerdict::parse)?
            .unwrap_or(EffectivenessVerdict::ToVerify);
    let report: Report = persistence
        .get_report(report_id)
        .map_err(translate_persistence_error)?;

    let command = Command::Close {
        closed_by: request.closed_by,
        notes: request.notes,
        effectiveness,
        evidence,
    };
    let result: TransitionResult = run_transition(persistence, &report, command, now)?;

    let number: String = report
        .number
        .clone()
        .unwrap_or_else(|| report.id.to_string());
    let (closed_by, notes): (&str, &str) = match &result.change {
        ncr::LifecycleChange::Close(record) => (
            or_empty(record.closed_by.as_deref()),
            or_empty(record.notes.as_deref()),
        ),
        ncr::LifecycleChange::Reopen(_) => ("", ""),
    };
    let notification: Message = closed_message(
        &ClosedReport {
            number: &number,
            title: report.fields.title_or_empty(),
            closed_by,
            effectiveness: effectiveness.label(),
            notes,
        },
        base_url,
    );

    Ok(ApiResult {
        response: transition_response(&result, format!("Report {number} closed")),
        notification: Some(notification),
    })
}

/// Reopens a closed report, attaching reopening evidence.
///
/// Prior closing details are kept.
///
/// # Errors
///
/// Returns an error if:
/// - The request does not act with the Quality access level
/// - The report does not exist or is not closed
/// - The store fails
pub fn reopen_report(
    persistence: &mut SqlitePersistence,
    access: AccessLevel,
    report_id: i64,
    request: ReopenReportRequest,
    evidence: Vec<EvidenceUpload>,
    now: PrimitiveDateTime,
) -> Result<ApiResult<TransitionResponse>, ApiError> {
    AuthorizationService::require_quality(access, "reopen_report")?;

    let report: Report = persistence
        .get_report(report_id)
        .map_err(translate_persistence_error)?;
    let command = Command::Reopen {
        reopened_by: request.reopened_by,
        reason: request.reason,
        evidence,
    };
    let result: TransitionResult = run_transition(persistence, &report, command, now)?;

    let number: &str = report.number.as_deref().unwrap_or_default();
    Ok(ApiResult {
        response: transition_response(
            &result,
            format!("Report {number} reopened; status is now In Action"),
        ),
        notification: None,
    })
}

// ============================================================================
// Evidence & documents
// ============================================================================

fn parse_evidence_category(raw: &str) -> Result<EvidenceCategory, ApiError> {
    EvidenceCategory::parse(raw).map_err(translate_domain_error)
}

/// Lists a report's evidence metadata in one category.
///
/// # Errors
///
/// Returns an error if the category is unknown, the report does not exist,
/// or the query fails.
pub fn list_evidence(
    persistence: &mut SqlitePersistence,
    report_id: i64,
    category: &str,
) -> Result<ListEvidenceResponse, ApiError> {
    let category: EvidenceCategory = parse_evidence_category(category)?;
    persistence
        .get_report(report_id)
        .map_err(translate_persistence_error)?;
    let evidence: Vec<Evidence> = persistence
        .list_evidence(report_id, category)
        .map_err(translate_persistence_error)?;

    Ok(ListEvidenceResponse {
        report_id,
        category,
        evidence: evidence.iter().map(EvidenceInfo::from).collect(),
    })
}

/// Retrieves one evidence item's bytes.
///
/// # Errors
///
/// Returns an error if the category is unknown or the item does not exist
/// under that report and category.
pub fn get_evidence(
    persistence: &mut SqlitePersistence,
    report_id: i64,
    category: &str,
    evidence_id: i64,
) -> Result<Download, ApiError> {
    let category: EvidenceCategory = parse_evidence_category(category)?;
    let evidence: Evidence = persistence
        .get_evidence(report_id, category, evidence_id)
        .map_err(translate_persistence_error)?;

    Ok(Download {
        filename: evidence.filename,
        media_type: evidence.media_type,
        content: evidence.content,
    })
}

/// Renders a report's printable document.
///
/// # Errors
///
/// Returns an error if the report does not exist, a query fails, or PDF
/// generation fails.
pub fn render_document(
    persistence: &mut SqlitePersistence,
    report_id: i64,
) -> Result<Download, ApiError> {
    let report: Report = persistence
        .get_report(report_id)
        .map_err(translate_persistence_error)?;

    let mut evidence: Vec<Evidence> = Vec::new();
    for category in EvidenceCategory::ALL {
        evidence.extend(
            persistence
                .list_evidence(report_id, category)
                .map_err(translate_persistence_error)?,
        );
    }
    let logo: Option<Logo> = persistence.get_logo().map_err(translate_persistence_error)?;

    let content: Vec<u8> =
        render_report(&report, &evidence, logo.as_ref().map(|l| l.content.as_slice())).map_err(
            |e| ApiError::Internal {
                message: e.to_string(),
            },
        )?;
    info!(report_id, bytes = content.len(), "Rendered report document");

    Ok(Download {
        filename: document_filename(&report),
        media_type: String::from("application/pdf"),
        content,
    })
}

// ============================================================================
// Bulk exchange
// ============================================================================

/// Exports every report in the tabular format.
///
/// # Errors
///
/// Returns an error if the query or serialization fails.
pub fn export_csv(persistence: &mut SqlitePersistence) -> Result<Download, ApiError> {
    let reports: Vec<Report> = persistence
        .list_reports()
        .map_err(translate_persistence_error)?;
    let content: Vec<u8> = export_reports_csv(&reports)?;
    info!(reports = reports.len(), "Exported reports");

    Ok(Download {
        filename: String::from(EXPORT_FILENAME),
        media_type: String::from("text/csv; charset=utf-8"),
        content,
    })
}

/// Imports a tabular file, upserting reports by number.
///
/// # Errors
///
/// Returns an error if the request does not act with the Quality access
/// level, the file is malformed, or the store fails (nothing is imported
/// then).
pub fn import_csv(
    persistence: &mut SqlitePersistence,
    access: AccessLevel,
    content: &[u8],
) -> Result<ImportResponse, ApiError> {
    AuthorizationService::require_quality(access, "import")?;

    let records = parse_report_csv(content)?;
    let summary: ImportSummary = persistence
        .import_records(&records)
        .map_err(translate_persistence_error)?;

    Ok(ImportResponse {
        inserted: summary.inserted,
        updated: summary.updated,
        processed: summary.processed(),
        message: format!("{} record(s) imported or updated", summary.processed()),
    })
}

// ============================================================================
// Cost codes & logo
// ============================================================================

/// Lists cost codes in lexicographic order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_cost_codes(
    persistence: &mut SqlitePersistence,
) -> Result<ListCostCodesResponse, ApiError> {
    Ok(ListCostCodesResponse {
        codes: persistence
            .list_cost_codes()
            .map_err(translate_persistence_error)?,
    })
}

fn cost_code_response(summary: CostCodeSummary) -> AddCostCodesResponse {
    AddCostCodesResponse {
        attempted: summary.attempted,
        inserted: summary.inserted,
        ignored: summary.ignored,
    }
}

/// Adds cost codes; blanks and duplicates are ignored.
///
/// # Errors
///
/// Returns an error if the request does not act with the Quality access
/// level or the store fails.
pub fn add_cost_codes(
    persistence: &mut SqlitePersistence,
    access: AccessLevel,
    request: &AddCostCodesRequest,
) -> Result<AddCostCodesResponse, ApiError> {
    AuthorizationService::require_quality(access, "add_cost_codes")?;
    persistence
        .add_cost_codes(&request.codes)
        .map(cost_code_response)
        .map_err(translate_persistence_error)
}

/// Adds cost codes from a file with a `code` column.
///
/// # Errors
///
/// Returns an error if the request does not act with the Quality access
/// level, the file has no `code` column, or the store fails.
pub fn import_cost_codes(
    persistence: &mut SqlitePersistence,
    access: AccessLevel,
    content: &[u8],
) -> Result<AddCostCodesResponse, ApiError> {
    AuthorizationService::require_quality(access, "import_cost_codes")?;
    let codes: Vec<String> = parse_cost_code_csv(content)?;
    persistence
        .add_cost_codes(&codes)
        .map(cost_code_response)
        .map_err(translate_persistence_error)
}

/// Retrieves the branding image.
///
/// # Errors
///
/// Returns an error if no logo is stored or the query fails.
pub fn get_logo(persistence: &mut SqlitePersistence) -> Result<Download, ApiError> {
    let logo: Logo = persistence
        .get_logo()
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Logo"),
            message: String::from("No logo has been uploaded"),
        })?;

    Ok(Download {
        filename: String::from("logo"),
        media_type: logo
            .media_type
            .unwrap_or_else(|| String::from("application/octet-stream")),
        content: logo.content,
    })
}

/// Stores the branding image, replacing the previous one.
///
/// # Errors
///
/// Returns an error if the request does not act with the Quality access
/// level, the body is empty, or the store fails.
pub fn set_logo(
    persistence: &mut SqlitePersistence,
    access: AccessLevel,
    content: &[u8],
    media_type: Option<&str>,
) -> Result<SetLogoResponse, ApiError> {
    AuthorizationService::require_quality(access, "set_logo")?;
    if content.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("logo"),
            message: String::from("Logo upload is empty"),
        });
    }

    persistence
        .set_logo(content, media_type)
        .map_err(translate_persistence_error)?;

    Ok(SetLogoResponse {
        size: content.len(),
        message: String::from("Logo updated"),
    })
}
