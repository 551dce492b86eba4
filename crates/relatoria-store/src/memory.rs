use std::collections::BTreeMap;

use serde_json::Map;
use tokio::sync::Mutex;
use uuid::Uuid;

use relatoria_core::BoxFuture;
use relatoria_core::models::dataset::Dataset;
use relatoria_core::models::history::ReportHistoryRecord;
use relatoria_core::models::id::RecordId;
use relatoria_core::models::lead::NewLead;
use relatoria_core::models::report::{NewReportRequest, ReportRequest, ReportReset};

use crate::error::StoreError;
use crate::{LeadStore, ReportStore};

/// Calls that should fail on the in-memory store.
#[derive(Debug, Clone, Copy, Default)]
pub struct Faults {
    pub fetch_report: bool,
    pub insert_report: bool,
    pub insert_history: bool,
    pub reset_report: bool,
    pub delete_report: bool,
    pub fetch_dataset: bool,
    pub delete_dataset: bool,
    pub insert_lead: bool,
}

#[derive(Default)]
struct Tables {
    reports: BTreeMap<RecordId, ReportRequest>,
    history: Vec<(RecordId, ReportHistoryRecord)>,
    datasets: BTreeMap<RecordId, Dataset>,
    leads: Vec<NewLead>,
    faults: Faults,
    racing: bool,
}

/// Process-local tables with the same contract as the REST store.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(self, report: ReportRequest) -> Self {
        let mut tables = self.tables.into_inner();
        tables.reports.insert(report.id.clone(), report);
        Self {
            tables: Mutex::new(tables),
        }
    }

    pub fn with_dataset(self, dataset: Dataset) -> Self {
        let mut tables = self.tables.into_inner();
        tables.datasets.insert(dataset.id.clone(), dataset);
        Self {
            tables: Mutex::new(tables),
        }
    }

    pub async fn set_faults(&self, faults: Faults) {
        self.tables.lock().await.faults = faults;
    }

    /// While set, every report read is followed by another writer bumping
    /// that row's version, so the caller's guarded write loses the race.
    pub async fn set_racing(&self, racing: bool) {
        self.tables.lock().await.racing = racing;
    }

    pub async fn report(&self, id: &RecordId) -> Option<ReportRequest> {
        self.tables.lock().await.reports.get(id).cloned()
    }

    pub async fn report_count(&self) -> usize {
        self.tables.lock().await.reports.len()
    }

    pub async fn history(&self) -> Vec<(RecordId, ReportHistoryRecord)> {
        self.tables.lock().await.history.clone()
    }

    pub async fn dataset(&self, id: &RecordId) -> Option<Dataset> {
        self.tables.lock().await.datasets.get(id).cloned()
    }

    pub async fn leads(&self) -> Vec<NewLead> {
        self.tables.lock().await.leads.clone()
    }
}

fn fresh_id() -> RecordId {
    RecordId::new(Uuid::new_v4().to_string())
}

impl ReportStore for MemoryStore {
    fn fetch_report<'a>(
        &'a self,
        id: &'a RecordId,
    ) -> BoxFuture<'a, Result<Option<ReportRequest>, StoreError>> {
        Box::pin(async move {
            let mut tables = self.tables.lock().await;
            if tables.faults.fetch_report {
                return Err(StoreError::Injected("fetch_report"));
            }
            let row = tables.reports.get(id).cloned();
            if tables.racing
                && let Some(report) = tables.reports.get_mut(id)
            {
                report.version = Some(report.version.unwrap_or(0) + 1);
            }
            Ok(row)
        })
    }

    fn insert_report<'a>(
        &'a self,
        report: &'a NewReportRequest,
    ) -> BoxFuture<'a, Result<ReportRequest, StoreError>> {
        Box::pin(async move {
            let mut tables = self.tables.lock().await;
            if tables.faults.insert_report {
                return Err(StoreError::Injected("insert_report"));
            }
            let row = ReportRequest {
                id: fresh_id(),
                owner_id: report.owner_id.clone(),
                dataset_id: report.dataset_id.clone(),
                status: report.status.clone(),
                ai_response: None,
                html_report_path: None,
                pdf_path: None,
                sent_via_email: Some(report.sent_via_email),
                error_message: None,
                created_at: Some(report.created_at.to_string()),
                updated_at: Some(report.updated_at.to_string()),
                version: Some(report.version),
                extra: Map::new(),
            };
            tables.reports.insert(row.id.clone(), row.clone());
            Ok(row)
        })
    }

    fn insert_history<'a>(
        &'a self,
        record: &'a ReportHistoryRecord,
    ) -> BoxFuture<'a, Result<RecordId, StoreError>> {
        Box::pin(async move {
            let mut tables = self.tables.lock().await;
            if tables.faults.insert_history {
                return Err(StoreError::Injected("insert_history"));
            }
            let id = fresh_id();
            tables.history.push((id.clone(), record.clone()));
            Ok(id)
        })
    }

    fn reset_report<'a>(
        &'a self,
        id: &'a RecordId,
        expected_version: Option<i64>,
        reset: &'a ReportReset,
    ) -> BoxFuture<'a, Result<Option<ReportRequest>, StoreError>> {
        Box::pin(async move {
            let mut tables = self.tables.lock().await;
            if tables.faults.reset_report {
                return Err(StoreError::Injected("reset_report"));
            }
            match tables.reports.get_mut(id) {
                Some(report) if report.version == expected_version => {
                    report.apply_reset(reset);
                    Ok(Some(report.clone()))
                }
                _ => Ok(None),
            }
        })
    }

    fn delete_report<'a>(
        &'a self,
        id: &'a RecordId,
        expected_version: Option<i64>,
    ) -> BoxFuture<'a, Result<bool, StoreError>> {
        Box::pin(async move {
            let mut tables = self.tables.lock().await;
            if tables.faults.delete_report {
                return Err(StoreError::Injected("delete_report"));
            }
            let matches = tables
                .reports
                .get(id)
                .is_some_and(|r| r.version == expected_version);
            if matches {
                tables.reports.remove(id);
            }
            Ok(matches)
        })
    }

    fn fetch_dataset<'a>(
        &'a self,
        id: &'a RecordId,
    ) -> BoxFuture<'a, Result<Option<Dataset>, StoreError>> {
        Box::pin(async move {
            let tables = self.tables.lock().await;
            if tables.faults.fetch_dataset {
                return Err(StoreError::Injected("fetch_dataset"));
            }
            Ok(tables.datasets.get(id).cloned())
        })
    }

    fn delete_dataset<'a>(&'a self, id: &'a RecordId) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let mut tables = self.tables.lock().await;
            if tables.faults.delete_dataset {
                return Err(StoreError::Injected("delete_dataset"));
            }
            tables.datasets.remove(id);
            Ok(())
        })
    }
}

impl LeadStore for MemoryStore {
    fn insert_lead<'a>(&'a self, lead: &'a NewLead) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let mut tables = self.tables.lock().await;
            if tables.faults.insert_lead {
                return Err(StoreError::Injected("insert_lead"));
            }
            tables.leads.push(lead.clone());
            Ok(())
        })
    }
}
