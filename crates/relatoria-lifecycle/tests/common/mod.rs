#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Map, json};

use relatoria_core::locator::BucketRules;
use relatoria_core::models::dataset::Dataset;
use relatoria_core::models::id::RecordId;
use relatoria_core::models::report::{ReportRequest, ReportStatus};
use relatoria_lifecycle::controller::ReportLifecycle;
use relatoria_storage::memory::MemoryObjectStore;
use relatoria_store::memory::MemoryStore;

pub const OWNER: &str = "user-1";
pub const STRANGER: &str = "user-2";

pub fn done_report(id: &str) -> ReportRequest {
    ReportRequest {
        id: RecordId::new(id),
        owner_id: OWNER.to_string(),
        dataset_id: None,
        status: ReportStatus::Done,
        ai_response: Some(json!({"summary": "Vendas subiram 12%"})),
        html_report_path: Some(format!("reports/{id}.html")),
        pdf_path: None,
        sent_via_email: Some(true),
        error_message: None,
        created_at: Some("2024-05-01T12:00:00Z".to_string()),
        updated_at: Some("2024-05-01T12:05:00Z".to_string()),
        version: Some(0),
        extra: Map::new(),
    }
}

pub fn dataset(id: &str, filename: &str) -> Dataset {
    Dataset {
        id: RecordId::new(id),
        filename: Some(filename.to_string()),
        sample_json: Some(json!([{"produto": "pão", "valor": 3.5}])),
        extra: Map::new(),
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub objects: Arc<MemoryObjectStore>,
    pub lifecycle: ReportLifecycle,
}

pub fn harness(store: MemoryStore, objects: MemoryObjectStore) -> Harness {
    let store = Arc::new(store);
    let objects = Arc::new(objects);
    let lifecycle = ReportLifecycle::new(store.clone(), objects.clone(), BucketRules::default());
    Harness {
        store,
        objects,
        lifecycle,
    }
}
