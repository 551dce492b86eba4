//! Best-effort cleanup after a report has been snapshotted.
//!
//! Each action is independent: a failure is captured and logged, and the
//! remaining actions still run. Nothing here can fail the surrounding
//! operation.

use std::fmt;

use tracing::{info, warn};

use relatoria_core::locator::{BucketRules, ObjectLocator};
use relatoria_core::models::id::RecordId;
use relatoria_storage::ObjectStore;
use relatoria_store::ReportStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupAction {
    /// Remove a blob.
    RemoveObject(ObjectLocator),
    /// Look up the dataset's stored file and remove it from the dataset bucket.
    RemoveDatasetFile(RecordId),
    /// Delete the dataset row.
    DeleteDataset(RecordId),
}

impl fmt::Display for CleanupAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoveObject(loc) => write!(f, "remove object {loc}"),
            Self::RemoveDatasetFile(id) => write!(f, "remove file of dataset {id}"),
            Self::DeleteDataset(id) => write!(f, "delete dataset {id}"),
        }
    }
}

/// A cleanup action that did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupFailure {
    pub action: CleanupAction,
    pub error: String,
}

/// Ordered list of cleanup actions.
#[derive(Debug, Default)]
pub struct CleanupPlan {
    actions: Vec<CleanupAction>,
}

impl CleanupPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: CleanupAction) {
        self.actions.push(action);
    }

    /// Run every action in order. Returns the failures, if any.
    pub async fn run(
        self,
        reports: &dyn ReportStore,
        objects: &dyn ObjectStore,
        rules: &BucketRules,
    ) -> Vec<CleanupFailure> {
        let mut failures = Vec::new();
        for action in self.actions {
            match run_action(&action, reports, objects, rules).await {
                Ok(()) => info!(action = %action, "cleanup step done"),
                Err(error) => {
                    warn!(action = %action, error = %error, "cleanup step failed, continuing");
                    failures.push(CleanupFailure { action, error });
                }
            }
        }
        failures
    }
}

async fn run_action(
    action: &CleanupAction,
    reports: &dyn ReportStore,
    objects: &dyn ObjectStore,
    rules: &BucketRules,
) -> Result<(), String> {
    match action {
        CleanupAction::RemoveObject(locator) => {
            objects.remove(locator).await.map_err(|e| e.to_string())
        }
        CleanupAction::RemoveDatasetFile(id) => {
            let dataset = reports.fetch_dataset(id).await.map_err(|e| e.to_string())?;
            match dataset.and_then(|d| d.filename).filter(|f| !f.is_empty()) {
                Some(filename) => objects
                    .remove(&ObjectLocator::dataset_file(rules, &filename))
                    .await
                    .map_err(|e| e.to_string()),
                None => Ok(()),
            }
        }
        CleanupAction::DeleteDataset(id) => {
            reports.delete_dataset(id).await.map_err(|e| e.to_string())
        }
    }
}
