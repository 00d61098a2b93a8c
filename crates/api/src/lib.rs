// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod error;
mod exchange;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AccessLevel, AccessPolicy, AuthenticationService, AuthorizationService};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use exchange::{
    EXPORT_COLUMNS, canonical_column, detect_delimiter, export_reports_csv, parse_cost_code_csv,
    parse_report_csv,
};
pub use handlers::{
    ApiResult, EXPORT_FILENAME, add_cost_codes, close_report, deliver, export_csv, file_report,
    get_evidence, get_logo, get_report, import_cost_codes, import_csv, list_cost_codes,
    list_evidence, list_reports, login, logout, next_number, render_document, reopen_report,
    set_logo,
};
pub use request_response::{
    AddCostCodesRequest, AddCostCodesResponse, CloseReportRequest, Download, EvidenceInfo,
    FileReportRequest, FileReportResponse, ImportResponse, ListCostCodesResponse,
    ListEvidenceResponse, ListReportsQuery, ListReportsResponse, LoginRequest, LoginResponse,
    NextNumberResponse, NotificationInfo, ReopenReportRequest, ReportInfo, ReportInput,
    SetLogoResponse, TransitionResponse,
};
