use std::fmt;

use thiserror::Error;

use relatoria_core::models::id::RecordId;
use relatoria_store::error::StoreError;

/// The store call a lifecycle operation was making when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    FetchReport,
    CreateReport,
    WriteHistory,
    ResetReport,
    DeleteReport,
    FetchDataset,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FetchReport => "fetch report",
            Self::CreateReport => "create report",
            Self::WriteHistory => "write history",
            Self::ResetReport => "reset report",
            Self::DeleteReport => "delete report",
            Self::FetchDataset => "fetch dataset",
        })
    }
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("report not found: {0}")]
    ReportNotFound(RecordId),

    #[error("dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("user {user_id} does not own report {report_id}")]
    Forbidden { report_id: RecordId, user_id: String },

    #[error("report {0} was modified concurrently")]
    Conflict(RecordId),

    #[error("{step} failed: {source}")]
    Store {
        step: Step,
        #[source]
        source: StoreError,
    },
}

impl LifecycleError {
    pub fn store(step: Step) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { step, source }
    }
}
