use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use relatoria_auth::AuthUser;
use relatoria_core::models::id::RecordId;
use relatoria_core::models::responses::{
    CreateReportResponse, DeleteReportResponse, RegenerateReportResponse, ReportStatusResponse,
};

use crate::error::{ApiError, ErrorText};
use crate::routes::{first_id, parse_json_body};
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct IdBody {
    pub id: Option<RecordId>,
}

#[derive(Deserialize)]
pub struct ReportQuery {
    pub id: Option<String>,
    pub report_id: Option<String>,
    pub request_id: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct CreateBody {
    pub dataset_id: Option<RecordId>,
}

/// Queue a new report for the caller.
pub async fn create_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateReportResponse>), ApiError> {
    let body: CreateBody = parse_json_body(&body)?;

    let report = state
        .lifecycle
        .create(&user.id, body.dataset_id)
        .await
        .map_err(|e| ApiError::lifecycle(e, &ErrorText::REPORT))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReportResponse {
            success: true,
            request_id: report.id,
            status: report.status.to_string(),
        }),
    ))
}

pub async fn report_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<ReportStatusResponse>, ApiError> {
    let Query(query) = query?;
    let id = first_id([query.id, query.report_id, query.request_id])
        .ok_or_else(|| ApiError::BadRequest("report id is required".to_string()))?;

    let report = state
        .lifecycle
        .status(&id, &user.id)
        .await
        .map_err(|e| ApiError::lifecycle(e, &ErrorText::REPORT))?;

    Ok(Json(ReportStatusResponse {
        done: report.status.is_terminal(),
        id: report.id,
        status: report.status.to_string(),
        error_message: report.error_message,
        pdf_path: report.pdf_path,
        ai_response: report.ai_response,
        updated_at: report.updated_at,
    }))
}

/// Delete a report, its stored PDF, and its dataset.
///
/// The id comes from the query string (`id`, then `report_id`) or, failing
/// that, from a JSON body.
pub async fn delete_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<ReportQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<DeleteReportResponse>, ApiError> {
    let Query(query) = query?;
    let id = match first_id([query.id, query.report_id]) {
        Some(id) => id,
        None => parse_json_body::<IdBody>(&body)?
            .id
            .and_then(|id| RecordId::parse(id.as_str()))
            .ok_or_else(|| ApiError::BadRequest("report id is required".to_string()))?,
    };

    let outcome = state
        .lifecycle
        .delete(&id, &user.id)
        .await
        .map_err(|e| ApiError::lifecycle(e, &ErrorText::REPORT))?;

    Ok(Json(DeleteReportResponse {
        success: true,
        deleted_id: outcome.deleted_id,
        deleted_dataset_id: outcome.deleted_dataset_id,
        history_id: outcome.history_id,
    }))
}

/// Re-queue a report for generation.
pub async fn regenerate_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Bytes,
) -> Result<Json<RegenerateReportResponse>, ApiError> {
    let id = parse_json_body::<IdBody>(&body)?
        .id
        .and_then(|id| RecordId::parse(id.as_str()))
        .ok_or_else(|| ApiError::BadRequest("id is required".to_string()))?;

    let outcome = state
        .lifecycle
        .regenerate(&id, &user.id)
        .await
        .map_err(|e| ApiError::lifecycle(e, &ErrorText::REGENERATE))?;

    Ok(Json(RegenerateReportResponse {
        success: true,
        message: "Report regeneration initiated".to_string(),
        request_id: outcome.request_id,
        history_id: outcome.history_id,
    }))
}
