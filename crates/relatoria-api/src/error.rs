use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use relatoria_auth::error::AuthError;
use relatoria_core::error::CoreError;
use relatoria_core::models::responses::ErrorBody;
use relatoria_lifecycle::error::{LifecycleError, Step};

/// Unified API error type for all route handlers.
///
/// Every message is safe to show to the client; backend detail is logged
/// where the error is mapped, never returned.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    MethodNotAllowed,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl ApiError {
    pub fn invalid_json() -> Self {
        ApiError::BadRequest("Invalid JSON body".to_string())
    }
}

/// Per-route wording for lifecycle failures whose message differs between
/// endpoints.
pub struct ErrorText {
    pub forbidden: &'static str,
    pub report_not_found: &'static str,
    pub fetch_report_failed: &'static str,
}

impl ErrorText {
    pub const REPORT: ErrorText = ErrorText {
        forbidden: "Forbidden",
        report_not_found: "Report not found",
        fetch_report_failed: "Failed to fetch report",
    };

    pub const REGENERATE: ErrorText = ErrorText {
        forbidden: "Forbidden: not the report owner",
        ..Self::REPORT
    };

    pub const SAMPLE: ErrorText = ErrorText {
        forbidden: "Forbidden: not report request owner",
        report_not_found: "Report request not found",
        fetch_report_failed: "Failed to fetch report request",
    };
}

impl ApiError {
    pub fn lifecycle(err: LifecycleError, text: &ErrorText) -> Self {
        match err {
            LifecycleError::ReportNotFound(_) => ApiError::NotFound(text.report_not_found.to_string()),
            LifecycleError::DatasetNotFound(_) => ApiError::NotFound("Dataset not found".to_string()),
            LifecycleError::Forbidden { .. } => ApiError::Forbidden(text.forbidden.to_string()),
            LifecycleError::Conflict(_) => {
                ApiError::Conflict("Report was modified concurrently".to_string())
            }
            LifecycleError::Store { step, source } => {
                tracing::error!(step = %step, error = %source, "backend call failed");
                let message = match step {
                    Step::FetchReport => text.fetch_report_failed,
                    Step::CreateReport => "Failed to create report",
                    Step::WriteHistory => "Failed to save report to history",
                    Step::ResetReport => "Failed to reset report",
                    Step::DeleteReport => "Failed to delete report",
                    Step::FetchDataset => "Failed to fetch dataset",
                };
                ApiError::Internal(message.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingHeader => {
                ApiError::Unauthorized("Missing Authorization header".to_string())
            }
            AuthError::MissingToken => ApiError::Unauthorized("Missing token".to_string()),
            rejected if rejected.is_rejection() => {
                tracing::warn!(error = %rejected, "token rejected");
                ApiError::Unauthorized("Invalid token".to_string())
            }
            other => {
                tracing::error!(error = %other, "auth service unavailable");
                ApiError::Internal("Failed to verify token".to_string())
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        tracing::warn!(error = %e.body_text(), "invalid query string");
        ApiError::BadRequest("Invalid query string".to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::MissingField(_) => {
                ApiError::BadRequest("name and email are required".to_string())
            }
            CoreError::InvalidEmail => ApiError::BadRequest("invalid email format".to_string()),
            CoreError::InvalidPath(path) => ApiError::BadRequest(format!("invalid path: {path}")),
        }
    }
}
