use serde::Serialize;
use serde_json::{Map, Value};

use super::id::RecordId;
use super::report::{ReportRequest, ReportStatus};

/// Why a report row was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionReason {
    UserRequested,
}

/// The event that caused a snapshot to be taken.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HistoryEvent {
    Deleted {
        deleted_at: jiff::Timestamp,
        deletion_reason: DeletionReason,
    },
    Regenerated {
        regenerated_at: jiff::Timestamp,
    },
}

/// Insert payload for `report_requests_history`.
///
/// Carries every column of the source row except `id`; the store assigns
/// a fresh id and `original_id` points back at the source row, which may
/// no longer exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportHistoryRecord {
    pub original_id: RecordId,
    pub owner_id: String,
    pub dataset_id: Option<RecordId>,
    pub status: ReportStatus,
    pub ai_response: Option<Value>,
    pub html_report_path: Option<String>,
    pub pdf_path: Option<String>,
    pub sent_via_email: Option<bool>,
    pub error_message: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub version: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(flatten)]
    pub event: HistoryEvent,
}

impl ReportHistoryRecord {
    pub fn snapshot(report: &ReportRequest, event: HistoryEvent) -> Self {
        Self {
            original_id: report.id.clone(),
            owner_id: report.owner_id.clone(),
            dataset_id: report.dataset_id.clone(),
            status: report.status.clone(),
            ai_response: report.ai_response.clone(),
            html_report_path: report.html_report_path.clone(),
            pdf_path: report.pdf_path.clone(),
            sent_via_email: report.sent_via_email,
            error_message: report.error_message.clone(),
            created_at: report.created_at.clone(),
            updated_at: report.updated_at.clone(),
            version: report.version,
            extra: report.extra.clone(),
            event,
        }
    }

    pub fn deleted(report: &ReportRequest, at: jiff::Timestamp) -> Self {
        Self::snapshot(
            report,
            HistoryEvent::Deleted {
                deleted_at: at,
                deletion_reason: DeletionReason::UserRequested,
            },
        )
    }

    pub fn regenerated(report: &ReportRequest, at: jiff::Timestamp) -> Self {
        Self::snapshot(report, HistoryEvent::Regenerated { regenerated_at: at })
    }
}
