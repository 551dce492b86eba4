use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{info, warn};

use relatoria_audit::events::{AuditAction, AuditEvent};
use relatoria_core::locator::{BucketRules, ObjectLocator};
use relatoria_core::models::history::ReportHistoryRecord;
use relatoria_core::models::id::RecordId;
use relatoria_core::models::report::{NewReportRequest, ReportRequest, ReportReset};
use relatoria_storage::ObjectStore;
use relatoria_store::ReportStore;

use crate::cleanup::{CleanupAction, CleanupFailure, CleanupPlan};
use crate::error::{LifecycleError, Step};
use crate::guard::ensure_owner;

const RESOURCE_TYPE: &str = "report_request";

/// Result of a successful deletion.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub deleted_id: RecordId,
    pub deleted_dataset_id: Option<RecordId>,
    pub history_id: RecordId,
    /// Best-effort steps that did not complete. Never fatal.
    pub cleanup_failures: Vec<CleanupFailure>,
}

/// Result of a successful regeneration request.
#[derive(Debug)]
pub struct RegenerateOutcome {
    pub request_id: RecordId,
    pub history_id: RecordId,
    pub report: ReportRequest,
}

/// Orchestrates report status transitions against the injected stores.
///
/// Holds no per-request state; one instance is built at startup and shared.
pub struct ReportLifecycle {
    reports: Arc<dyn ReportStore>,
    objects: Arc<dyn ObjectStore>,
    rules: BucketRules,
}

impl ReportLifecycle {
    pub fn new(
        reports: Arc<dyn ReportStore>,
        objects: Arc<dyn ObjectStore>,
        rules: BucketRules,
    ) -> Self {
        Self {
            reports,
            objects,
            rules,
        }
    }

    /// Fetch a report and check the caller owns it.
    async fn load_owned(
        &self,
        id: &RecordId,
        caller_id: &str,
    ) -> Result<ReportRequest, LifecycleError> {
        let report = self
            .reports
            .fetch_report(id)
            .await
            .map_err(LifecycleError::store(Step::FetchReport))?
            .ok_or_else(|| {
                warn!(report_id = %id, "report not found");
                LifecycleError::ReportNotFound(id.clone())
            })?;

        ensure_owner(&report, caller_id)?;
        Ok(report)
    }

    /// Queue a new report for generation.
    pub async fn create(
        &self,
        caller_id: &str,
        dataset_id: Option<RecordId>,
    ) -> Result<ReportRequest, LifecycleError> {
        if let Some(dataset_id) = &dataset_id {
            let exists = self
                .reports
                .fetch_dataset(dataset_id)
                .await
                .map_err(LifecycleError::store(Step::FetchDataset))?
                .is_some();
            if !exists {
                return Err(LifecycleError::DatasetNotFound(dataset_id.to_string()));
            }
        }

        let new = NewReportRequest::pending(caller_id, dataset_id, jiff::Timestamp::now());
        let report = self
            .reports
            .insert_report(&new)
            .await
            .map_err(LifecycleError::store(Step::CreateReport))?;

        info!(report_id = %report.id, user_id = caller_id, "report queued");
        AuditEvent::new(AuditAction::Create, RESOURCE_TYPE, report.id.as_str(), caller_id).emit();
        Ok(report)
    }

    /// Current state of a report the caller owns.
    pub async fn status(
        &self,
        id: &RecordId,
        caller_id: &str,
    ) -> Result<ReportRequest, LifecycleError> {
        self.load_owned(id, caller_id).await
    }

    /// Snapshot the report, then reset it in place to `pending` so the
    /// generation worker picks it up again. The id is preserved.
    pub async fn regenerate(
        &self,
        id: &RecordId,
        caller_id: &str,
    ) -> Result<RegenerateOutcome, LifecycleError> {
        let report = self.load_owned(id, caller_id).await?;
        let now = jiff::Timestamp::now();

        // History must be committed before the row is touched.
        let history_id = self
            .reports
            .insert_history(&ReportHistoryRecord::regenerated(&report, now))
            .await
            .map_err(LifecycleError::store(Step::WriteHistory))?;
        info!(report_id = %id, history_id = %history_id, "report saved to history");

        let reset = ReportReset::requeue(report.version, now);
        let updated = self
            .reports
            .reset_report(id, report.version, &reset)
            .await
            .map_err(LifecycleError::store(Step::ResetReport))?
            .ok_or_else(|| {
                warn!(report_id = %id, version = ?report.version, "report changed during regenerate");
                LifecycleError::Conflict(id.clone())
            })?;
        info!(report_id = %id, "report status reset to pending");

        AuditEvent::new(AuditAction::Regenerate, RESOURCE_TYPE, id.as_str(), caller_id)
            .with_details(json!({ "history_id": history_id.as_str() }))
            .emit();

        Ok(RegenerateOutcome {
            request_id: id.clone(),
            history_id,
            report: updated,
        })
    }

    /// Snapshot the report, then remove it and everything hanging off it.
    ///
    /// Ownership and the history write are hard gates. After that the row
    /// delete is the only fatal step; blob removal and the dataset cascade
    /// are best-effort.
    pub async fn delete(
        &self,
        id: &RecordId,
        caller_id: &str,
    ) -> Result<DeleteOutcome, LifecycleError> {
        let report = self.load_owned(id, caller_id).await?;

        let history_id = self
            .reports
            .insert_history(&ReportHistoryRecord::deleted(&report, jiff::Timestamp::now()))
            .await
            .map_err(LifecycleError::store(Step::WriteHistory))?;
        info!(report_id = %id, history_id = %history_id, "report saved to history");

        let mut artifacts = CleanupPlan::new();
        if let Some(pdf) = self.pdf_locator(&report) {
            artifacts.push(CleanupAction::RemoveObject(pdf));
        }
        let mut cleanup_failures = artifacts
            .run(self.reports.as_ref(), self.objects.as_ref(), &self.rules)
            .await;

        let deleted = self
            .reports
            .delete_report(id, report.version)
            .await
            .map_err(LifecycleError::store(Step::DeleteReport))?;
        if !deleted {
            warn!(report_id = %id, version = ?report.version, "report changed during delete");
            return Err(LifecycleError::Conflict(id.clone()));
        }
        info!(report_id = %id, "report deleted");

        if let Some(dataset_id) = &report.dataset_id {
            let mut cascade = CleanupPlan::new();
            cascade.push(CleanupAction::RemoveDatasetFile(dataset_id.clone()));
            cascade.push(CleanupAction::DeleteDataset(dataset_id.clone()));
            cleanup_failures.extend(
                cascade
                    .run(self.reports.as_ref(), self.objects.as_ref(), &self.rules)
                    .await,
            );
        }

        AuditEvent::new(AuditAction::Delete, RESOURCE_TYPE, id.as_str(), caller_id)
            .with_details(json!({
                "history_id": history_id.as_str(),
                "dataset_id": report.dataset_id.as_ref().map(RecordId::as_str),
                "cleanup_failures": cleanup_failures.len(),
            }))
            .emit();

        Ok(DeleteOutcome {
            deleted_id: id.clone(),
            deleted_dataset_id: report.dataset_id,
            history_id,
            cleanup_failures,
        })
    }

    /// The cached sample of the dataset behind a report the caller owns.
    pub async fn dataset_sample(
        &self,
        report_id: &RecordId,
        caller_id: &str,
    ) -> Result<Option<Value>, LifecycleError> {
        let report = self.load_owned(report_id, caller_id).await?;

        let Some(dataset_id) = report.dataset_id else {
            warn!(report_id = %report_id, "report has no dataset");
            return Err(LifecycleError::DatasetNotFound(String::new()));
        };

        let dataset = self
            .reports
            .fetch_dataset(&dataset_id)
            .await
            .map_err(LifecycleError::store(Step::FetchDataset))?
            .ok_or_else(|| {
                warn!(dataset_id = %dataset_id, "dataset not found");
                LifecycleError::DatasetNotFound(dataset_id.to_string())
            })?;

        info!(report_id = %report_id, dataset_id = %dataset_id, "sample retrieved");
        Ok(dataset.sample_json)
    }

    fn pdf_locator(&self, report: &ReportRequest) -> Option<ObjectLocator> {
        let path = report.pdf_path.as_deref()?;
        match ObjectLocator::resolve_pdf_path(path, &self.rules) {
            Ok(locator) => Some(locator),
            Err(e) => {
                warn!(report_id = %report.id, error = %e, "ignoring unusable pdf_path");
                None
            }
        }
    }
}
