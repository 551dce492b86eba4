mod common;

use relatoria_core::locator::ObjectLocator;
use relatoria_core::models::id::RecordId;
use relatoria_lifecycle::cleanup::CleanupAction;
use relatoria_lifecycle::error::{LifecycleError, Step};
use relatoria_storage::memory::MemoryObjectStore;
use relatoria_store::memory::{Faults, MemoryStore};

use common::{OWNER, STRANGER, dataset, done_report, harness};

#[tokio::test]
async fn plain_report_is_deleted_with_one_history_record_and_no_storage_calls() {
    let h = harness(
        MemoryStore::new().with_report(done_report("42")),
        MemoryObjectStore::new(),
    );
    let id = RecordId::new("42");

    let outcome = h.lifecycle.delete(&id, OWNER).await.unwrap();

    assert_eq!(outcome.deleted_id, id);
    assert_eq!(outcome.deleted_dataset_id, None);
    assert!(outcome.cleanup_failures.is_empty());
    assert_eq!(h.store.report_count().await, 0);

    let history = h.store.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].0, outcome.history_id);
    assert_eq!(history[0].1.original_id, id);
    assert!(h.objects.removal_attempts().await.is_empty());
}

#[tokio::test]
async fn non_owner_is_forbidden_and_nothing_changes() {
    let mut report = done_report("42");
    report.dataset_id = Some(RecordId::new("d1"));
    report.pdf_path = Some("reports/user-1/42.pdf".to_string());
    let h = harness(
        MemoryStore::new()
            .with_report(report)
            .with_dataset(dataset("d1", "user-1/sales.csv")),
        MemoryObjectStore::new(),
    );
    let id = RecordId::new("42");

    let err = h.lifecycle.delete(&id, STRANGER).await.unwrap_err();

    assert!(matches!(err, LifecycleError::Forbidden { .. }));
    assert!(h.store.report(&id).await.is_some());
    assert!(h.store.dataset(&RecordId::new("d1")).await.is_some());
    assert!(h.store.history().await.is_empty());
    assert!(h.objects.removal_attempts().await.is_empty());
}

#[tokio::test]
async fn missing_report_is_not_found() {
    let h = harness(MemoryStore::new(), MemoryObjectStore::new());
    let err = h
        .lifecycle
        .delete(&RecordId::new("404"), OWNER)
        .await
        .unwrap_err();
    assert!(matches!(err, LifecycleError::ReportNotFound(_)));
}

#[tokio::test]
async fn history_failure_leaves_the_report_in_place() {
    let mut report = done_report("42");
    report.pdf_path = Some("reports/user-1/42.pdf".to_string());
    let h = harness(MemoryStore::new().with_report(report), MemoryObjectStore::new());
    h.store
        .set_faults(Faults {
            insert_history: true,
            ..Faults::default()
        })
        .await;
    let id = RecordId::new("42");

    let err = h.lifecycle.delete(&id, OWNER).await.unwrap_err();

    assert!(matches!(
        err,
        LifecycleError::Store {
            step: Step::WriteHistory,
            ..
        }
    ));
    assert!(h.store.report(&id).await.is_some());
    assert!(h.objects.removal_attempts().await.is_empty());
}

#[tokio::test]
async fn pdf_and_dataset_are_removed_with_the_report() {
    let pdf = ObjectLocator::new("reports", "user-1/42.pdf");
    let csv = ObjectLocator::new("datasets", "user-1/sales.csv");
    let mut report = done_report("42");
    report.pdf_path = Some(pdf.to_stored_path());
    report.dataset_id = Some(RecordId::new("d1"));
    let h = harness(
        MemoryStore::new()
            .with_report(report)
            .with_dataset(dataset("d1", "user-1/sales.csv")),
        MemoryObjectStore::new()
            .with_object(pdf.clone(), b"%PDF".to_vec())
            .with_object(csv.clone(), b"a,b".to_vec()),
    );

    let outcome = h.lifecycle.delete(&RecordId::new("42"), OWNER).await.unwrap();

    assert_eq!(outcome.deleted_dataset_id, Some(RecordId::new("d1")));
    assert!(outcome.cleanup_failures.is_empty());
    assert!(!h.objects.contains(&pdf).await);
    assert!(!h.objects.contains(&csv).await);
    assert!(h.store.dataset(&RecordId::new("d1")).await.is_none());
    assert_eq!(h.objects.removal_attempts().await, vec![pdf, csv]);
}

#[tokio::test]
async fn storage_failures_do_not_stop_the_cascade() {
    let mut report = done_report("42");
    report.pdf_path = Some("reports/user-1/42.pdf".to_string());
    report.dataset_id = Some(RecordId::new("d1"));
    let h = harness(
        MemoryStore::new()
            .with_report(report)
            .with_dataset(dataset("d1", "user-1/sales.csv")),
        MemoryObjectStore::new(),
    );
    h.objects.fail_bucket("reports").await;
    h.objects.fail_bucket("datasets").await;

    let outcome = h.lifecycle.delete(&RecordId::new("42"), OWNER).await.unwrap();

    assert_eq!(h.store.report_count().await, 0);
    assert!(h.store.dataset(&RecordId::new("d1")).await.is_none());
    let failed: Vec<_> = outcome
        .cleanup_failures
        .iter()
        .map(|f| f.action.clone())
        .collect();
    assert_eq!(
        failed,
        vec![
            CleanupAction::RemoveObject(ObjectLocator::new("reports", "user-1/42.pdf")),
            CleanupAction::RemoveDatasetFile(RecordId::new("d1")),
        ]
    );
}

#[tokio::test]
async fn dataset_row_failure_is_not_fatal() {
    let mut report = done_report("42");
    report.dataset_id = Some(RecordId::new("d1"));
    let h = harness(
        MemoryStore::new()
            .with_report(report)
            .with_dataset(dataset("d1", "user-1/sales.csv")),
        MemoryObjectStore::new(),
    );
    h.store
        .set_faults(Faults {
            delete_dataset: true,
            ..Faults::default()
        })
        .await;

    let outcome = h.lifecycle.delete(&RecordId::new("42"), OWNER).await.unwrap();

    assert_eq!(h.store.report_count().await, 0);
    assert_eq!(outcome.cleanup_failures.len(), 1);
    assert_eq!(
        outcome.cleanup_failures[0].action,
        CleanupAction::DeleteDataset(RecordId::new("d1"))
    );
}

#[tokio::test]
async fn row_delete_failure_is_fatal_but_history_remains() {
    let h = harness(
        MemoryStore::new().with_report(done_report("42")),
        MemoryObjectStore::new(),
    );
    h.store
        .set_faults(Faults {
            delete_report: true,
            ..Faults::default()
        })
        .await;
    let id = RecordId::new("42");

    let err = h.lifecycle.delete(&id, OWNER).await.unwrap_err();

    assert!(matches!(
        err,
        LifecycleError::Store {
            step: Step::DeleteReport,
            ..
        }
    ));
    assert!(h.store.report(&id).await.is_some());
    assert_eq!(h.store.history().await.len(), 1);
}

#[tokio::test]
async fn unknown_pdf_prefix_is_removed_from_the_default_bucket() {
    let mut report = done_report("42");
    report.pdf_path = Some("user-1/42.pdf".to_string());
    let h = harness(MemoryStore::new().with_report(report), MemoryObjectStore::new());

    h.lifecycle.delete(&RecordId::new("42"), OWNER).await.unwrap();

    assert_eq!(
        h.objects.removal_attempts().await,
        vec![ObjectLocator::new("reports", "user-1/42.pdf")]
    );
}

#[tokio::test]
async fn row_with_null_columns_can_still_be_deleted() {
    let mut legacy = done_report("42");
    legacy.version = None;
    legacy.sent_via_email = None;
    legacy.created_at = Some("2024-05-01T12:00:00.123456".to_string());
    let h = harness(MemoryStore::new().with_report(legacy), MemoryObjectStore::new());
    let id = RecordId::new("42");

    h.lifecycle.delete(&id, OWNER).await.unwrap();

    assert_eq!(h.store.report_count().await, 0);
    let history = h.store.history().await;
    assert_eq!(history[0].1.version, None);
    assert_eq!(history[0].1.created_at.as_deref(), Some("2024-05-01T12:00:00.123456"));
}
