//! relatoria-store
//!
//! Relational tables behind the backend's REST interface: `report_requests`,
//! `report_requests_history`, `datasets`, and `leads`.

pub mod error;
pub mod memory;
pub mod postgrest;

use relatoria_core::BoxFuture;
use relatoria_core::models::dataset::Dataset;
use relatoria_core::models::history::ReportHistoryRecord;
use relatoria_core::models::id::RecordId;
use relatoria_core::models::lead::NewLead;
use relatoria_core::models::report::{NewReportRequest, ReportRequest, ReportReset};

use crate::error::StoreError;

pub const REPORTS_TABLE: &str = "report_requests";
pub const HISTORY_TABLE: &str = "report_requests_history";
pub const DATASETS_TABLE: &str = "datasets";
pub const LEADS_TABLE: &str = "leads";

/// Report requests, their audit history, and the datasets they reference.
///
/// Conditional mutations take the version the caller read (`None` matches a
/// null column); a mismatch is reported as "nothing matched" rather than an
/// error so the caller decides what a conflict means.
pub trait ReportStore: Send + Sync {
    fn fetch_report<'a>(
        &'a self,
        id: &'a RecordId,
    ) -> BoxFuture<'a, Result<Option<ReportRequest>, StoreError>>;

    fn insert_report<'a>(
        &'a self,
        report: &'a NewReportRequest,
    ) -> BoxFuture<'a, Result<ReportRequest, StoreError>>;

    /// Append a snapshot. Returns the id the store assigned to it.
    fn insert_history<'a>(
        &'a self,
        record: &'a ReportHistoryRecord,
    ) -> BoxFuture<'a, Result<RecordId, StoreError>>;

    /// Apply `reset` where `id` and `expected_version` both match.
    /// `None` when no row matched.
    fn reset_report<'a>(
        &'a self,
        id: &'a RecordId,
        expected_version: Option<i64>,
        reset: &'a ReportReset,
    ) -> BoxFuture<'a, Result<Option<ReportRequest>, StoreError>>;

    /// Delete where `id` and `expected_version` both match.
    /// `false` when no row matched.
    fn delete_report<'a>(
        &'a self,
        id: &'a RecordId,
        expected_version: Option<i64>,
    ) -> BoxFuture<'a, Result<bool, StoreError>>;

    fn fetch_dataset<'a>(
        &'a self,
        id: &'a RecordId,
    ) -> BoxFuture<'a, Result<Option<Dataset>, StoreError>>;

    fn delete_dataset<'a>(&'a self, id: &'a RecordId) -> BoxFuture<'a, Result<(), StoreError>>;
}

/// Beta sign-ups.
pub trait LeadStore: Send + Sync {
    fn insert_lead<'a>(&'a self, lead: &'a NewLead) -> BoxFuture<'a, Result<(), StoreError>>;
}
