//! JSON bodies returned by the HTTP surface.

use serde::Serialize;
use ts_rs::TS;

use super::id::RecordId;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SuccessBody {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct DeleteReportResponse {
    pub success: bool,
    pub deleted_id: RecordId,
    pub deleted_dataset_id: Option<RecordId>,
    pub history_id: RecordId,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct RegenerateReportResponse {
    pub success: bool,
    pub message: String,
    pub request_id: RecordId,
    pub history_id: RecordId,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct CreateReportResponse {
    pub success: bool,
    pub request_id: RecordId,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ReportStatusResponse {
    pub id: RecordId,
    pub status: String,
    pub error_message: Option<String>,
    pub pdf_path: Option<String>,
    pub ai_response: Option<serde_json::Value>,
    pub updated_at: Option<String>,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct DatasetSampleResponse {
    pub sample_json: Option<serde_json::Value>,
}
