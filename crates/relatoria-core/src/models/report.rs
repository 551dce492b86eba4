use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::RecordId;

/// One report generation job, as stored in `report_requests`.
///
/// Columns this service does not interpret are kept in `extra` so that
/// history snapshots copy the full row. Columns it only copies are typed
/// loosely: nullable where the table allows null, and timestamps kept as
/// the text the backend sent, with or without an offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub id: RecordId,
    pub owner_id: String,
    #[serde(default)]
    pub dataset_id: Option<RecordId>,
    pub status: ReportStatus,
    #[serde(default)]
    pub ai_response: Option<Value>,
    #[serde(default)]
    pub html_report_path: Option<String>,
    #[serde(default)]
    pub pdf_path: Option<String>,
    #[serde(default)]
    pub sent_via_email: Option<bool>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Optimistic concurrency counter, bumped by every in-place mutation.
    /// `None` for rows written before the column existed.
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReportRequest {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }

    /// Apply a reset in place, the same way the store applies it to the row.
    pub fn apply_reset(&mut self, reset: &ReportReset) {
        self.status = reset.status.clone();
        self.updated_at = Some(reset.updated_at.to_string());
        self.ai_response = reset.ai_response.clone();
        self.html_report_path = reset.html_report_path.clone();
        self.pdf_path = reset.pdf_path.clone();
        self.sent_via_email = Some(reset.sent_via_email);
        self.error_message = reset.error_message.clone();
        self.version = Some(reset.version);
    }
}

/// Lifecycle status of a report request.
///
/// The generation engine owns the full set of values; anything this service
/// does not know is preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    Pending,
    Processing,
    Done,
    Error,
    Other(String),
}

impl ReportStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Done => "done",
            Self::Error => "error",
            Self::Other(s) => s,
        }
    }

    /// Terminal statuses are never left by the generation engine on its own.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

impl From<String> for ReportStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "done" => Self::Done,
            "error" => Self::Error,
            _ => Self::Other(s),
        }
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The column values written when a report is re-queued for generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportReset {
    pub status: ReportStatus,
    pub updated_at: jiff::Timestamp,
    pub ai_response: Option<Value>,
    pub html_report_path: Option<String>,
    pub pdf_path: Option<String>,
    pub sent_via_email: bool,
    pub error_message: Option<String>,
    pub version: i64,
}

impl ReportReset {
    /// Fresh `pending` shape for a report currently at `current_version`.
    /// A row without a version starts counting from zero.
    pub fn requeue(current_version: Option<i64>, now: jiff::Timestamp) -> Self {
        Self {
            status: ReportStatus::Pending,
            updated_at: now,
            ai_response: None,
            html_report_path: None,
            pdf_path: None,
            sent_via_email: false,
            error_message: None,
            version: current_version.unwrap_or(0) + 1,
        }
    }
}

/// Insert payload for a brand-new report request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReportRequest {
    pub owner_id: String,
    pub dataset_id: Option<RecordId>,
    pub status: ReportStatus,
    pub sent_via_email: bool,
    pub version: i64,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl NewReportRequest {
    pub fn pending(
        owner_id: impl Into<String>,
        dataset_id: Option<RecordId>,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            dataset_id,
            status: ReportStatus::Pending,
            sent_via_email: false,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
