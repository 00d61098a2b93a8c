// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP handlers.
//!
//! Each handler locks the store, runs the API operation, releases the lock,
//! and only then delivers any notification the operation produced.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use ncr_api::{
    AddCostCodesRequest, AddCostCodesResponse, ApiResult, CloseReportRequest, Download,
    FileReportRequest, FileReportResponse, ImportResponse, ListCostCodesResponse,
    ListEvidenceResponse, ListReportsQuery, ListReportsResponse, LoginRequest, LoginResponse,
    NextNumberResponse, ReopenReportRequest, ReportInfo, ReportInput, SetLogoResponse,
    TransitionResponse, deliver,
};
use serde::Deserialize;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::info;

use crate::AppState;
use crate::http_error::HttpError;
use crate::session::{BearerToken, RequestAccess};
use crate::upload::{Upload, read_upload};

/// Name of the JSON part of a filing upload.
pub const REPORT_PART: &str = "report";
/// Name of the JSON part of a close or reopen upload.
pub const DETAILS_PART: &str = "details";

fn now_utc() -> PrimitiveDateTime {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

fn download_response(download: Download, disposition: &str) -> Response {
    let filename: String = download.filename.replace(['"', '\r', '\n'], "_");
    (
        [
            (header::CONTENT_TYPE, download.media_type),
            (
                header::CONTENT_DISPOSITION,
                format!("{disposition}; filename=\"{filename}\""),
            ),
        ],
        download.content,
    )
        .into_response()
}

// ============================================================================
// Sessions
// ============================================================================

/// Handler for POST `/session`.
pub async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = ncr_api::login(&mut persistence, &app_state.policy, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/session`.
pub async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    ncr_api::logout(&mut persistence, &token)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Reports
// ============================================================================

/// Query for the number preview.
#[derive(Debug, Default, Deserialize)]
pub struct NextNumberQuery {
    /// Report date; today when absent.
    pub date: Option<String>,
}

/// Handler for GET `/reports`.
pub async fn handle_list_reports(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ListReportsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListReportsResponse = ncr_api::list_reports(&mut persistence, &query)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/reports/next-number`.
pub async fn handle_next_number(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<NextNumberQuery>,
) -> Result<Json<NextNumberResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: NextNumberResponse =
        ncr_api::next_number(&mut persistence, query.date.as_deref(), now_utc().date())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/reports`.
///
/// Multipart: a `report` JSON part and any number of `photo` files.
pub async fn handle_file_report(
    AxumState(app_state): AxumState<AppState>,
    RequestAccess(access): RequestAccess,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FileReportResponse>), HttpError> {
    let upload: Upload<ReportInput> = read_upload(multipart, REPORT_PART).await?;
    let request = FileReportRequest {
        report: upload.payload,
        photos: upload.files,
    };

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<FileReportResponse> = ncr_api::file_report(
        &mut persistence,
        access,
        request,
        now_utc().date(),
        &app_state.base_url,
    )?;
    drop(persistence);

    let mut response: FileReportResponse = result.response;
    response.notification = deliver(&app_state.notifier, result.notification.as_ref()).await;
    info!(report_id = response.report_id, number = %response.number, "Report filed");

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/reports/{id}`.
pub async fn handle_get_report(
    AxumState(app_state): AxumState<AppState>,
    Path(report_id): Path<i64>,
) -> Result<Json<ReportInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ReportInfo = ncr_api::get_report(&mut persistence, report_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/reports/{id}/close`.
///
/// Multipart: an optional `details` JSON part and any number of `photo`
/// files.
pub async fn handle_close_report(
    AxumState(app_state): AxumState<AppState>,
    Path(report_id): Path<i64>,
    RequestAccess(access): RequestAccess,
    multipart: Multipart,
) -> Result<Json<TransitionResponse>, HttpError> {
    let upload: Upload<CloseReportRequest> = read_upload(multipart, DETAILS_PART).await?;

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<TransitionResponse> = ncr_api::close_report(
        &mut persistence,
        access,
        report_id,
        upload.payload,
        upload.files,
        now_utc(),
        &app_state.base_url,
    )?;
    drop(persistence);

    let mut response: TransitionResponse = result.response;
    response.notification = deliver(&app_state.notifier, result.notification.as_ref()).await;

    Ok(Json(response))
}

/// Handler for POST `/reports/{id}/reopen`.
///
/// Multipart: an optional `details` JSON part and any number of `photo`
/// files.
pub async fn handle_reopen_report(
    AxumState(app_state): AxumState<AppState>,
    Path(report_id): Path<i64>,
    RequestAccess(access): RequestAccess,
    multipart: Multipart,
) -> Result<Json<TransitionResponse>, HttpError> {
    let upload: Upload<ReopenReportRequest> = read_upload(multipart, DETAILS_PART).await?;

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<TransitionResponse> = ncr_api::reopen_report(
        &mut persistence,
        access,
        report_id,
        upload.payload,
        upload.files,
        now_utc(),
    )?;
    drop(persistence);

    Ok(Json(result.response))
}

// ============================================================================
// Evidence & documents
// ============================================================================

/// Handler for GET `/reports/{id}/evidence/{category}`.
pub async fn handle_list_evidence(
    AxumState(app_state): AxumState<AppState>,
    Path((report_id, category)): Path<(i64, String)>,
) -> Result<Json<ListEvidenceResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListEvidenceResponse =
        ncr_api::list_evidence(&mut persistence, report_id, &category)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/reports/{id}/evidence/{category}/{evidence_id}`.
pub async fn handle_get_evidence(
    AxumState(app_state): AxumState<AppState>,
    Path((report_id, category, evidence_id)): Path<(i64, String, i64)>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let download: Download =
        ncr_api::get_evidence(&mut persistence, report_id, &category, evidence_id)?;
    drop(persistence);

    Ok(download_response(download, "inline"))
}

/// Handler for GET `/reports/{id}/document`.
pub async fn handle_get_document(
    AxumState(app_state): AxumState<AppState>,
    Path(report_id): Path<i64>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let download: Download = ncr_api::render_document(&mut persistence, report_id)?;
    drop(persistence);

    Ok(download_response(download, "attachment"))
}

// ============================================================================
// Bulk exchange
// ============================================================================

/// Handler for GET `/export`.
pub async fn handle_export(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let download: Download = ncr_api::export_csv(&mut persistence)?;
    drop(persistence);

    Ok(download_response(download, "attachment"))
}

/// Handler for POST `/import`. The body is the file itself.
pub async fn handle_import(
    AxumState(app_state): AxumState<AppState>,
    RequestAccess(access): RequestAccess,
    body: Bytes,
) -> Result<Json<ImportResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ImportResponse = ncr_api::import_csv(&mut persistence, access, &body)?;
    drop(persistence);

    info!(
        inserted = response.inserted,
        updated = response.updated,
        "Import complete"
    );
    Ok(Json(response))
}

// ============================================================================
// Cost codes & logo
// ============================================================================

/// Handler for GET `/cost-codes`.
pub async fn handle_list_cost_codes(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListCostCodesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListCostCodesResponse = ncr_api::list_cost_codes(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/cost-codes`.
pub async fn handle_add_cost_codes(
    AxumState(app_state): AxumState<AppState>,
    RequestAccess(access): RequestAccess,
    Json(req): Json<AddCostCodesRequest>,
) -> Result<Json<AddCostCodesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AddCostCodesResponse = ncr_api::add_cost_codes(&mut persistence, access, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/cost-codes/import`. The body is the file itself.
pub async fn handle_import_cost_codes(
    AxumState(app_state): AxumState<AppState>,
    RequestAccess(access): RequestAccess,
    body: Bytes,
) -> Result<Json<AddCostCodesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AddCostCodesResponse =
        ncr_api::import_cost_codes(&mut persistence, access, &body)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/logo`.
pub async fn handle_get_logo(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let download: Download = ncr_api::get_logo(&mut persistence)?;
    drop(persistence);

    Ok(download_response(download, "inline"))
}

/// Handler for PUT `/logo`. The body is the image itself.
pub async fn handle_set_logo(
    AxumState(app_state): AxumState<AppState>,
    RequestAccess(access): RequestAccess,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SetLogoResponse>, HttpError> {
    let media_type: Option<&str> = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let mut persistence = app_state.persistence.lock().await;
    let response: SetLogoResponse = ncr_api::set_logo(&mut persistence, access, &body, media_type)?;
    drop(persistence);

    Ok(Json(response))
}
