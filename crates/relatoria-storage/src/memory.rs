use std::collections::{BTreeMap, HashSet};

use tokio::sync::Mutex;

use relatoria_core::BoxFuture;
use relatoria_core::locator::ObjectLocator;

use crate::ObjectStore;
use crate::error::StorageError;

#[derive(Default)]
struct Buckets {
    objects: BTreeMap<ObjectLocator, Vec<u8>>,
    failing_buckets: HashSet<String>,
    calls: Vec<ObjectLocator>,
}

/// Process-local object store. Records every removal attempt.
#[derive(Default)]
pub struct MemoryObjectStore {
    inner: Mutex<Buckets>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(self, locator: ObjectLocator, body: impl Into<Vec<u8>>) -> Self {
        let mut inner = self.inner.into_inner();
        inner.objects.insert(locator, body.into());
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Make every removal in `bucket` fail.
    pub async fn fail_bucket(&self, bucket: impl Into<String>) {
        self.inner.lock().await.failing_buckets.insert(bucket.into());
    }

    pub async fn contains(&self, locator: &ObjectLocator) -> bool {
        self.inner.lock().await.objects.contains_key(locator)
    }

    /// Every locator a removal was attempted on, in order.
    pub async fn removal_attempts(&self) -> Vec<ObjectLocator> {
        self.inner.lock().await.calls.clone()
    }
}

impl ObjectStore for MemoryObjectStore {
    fn remove<'a>(&'a self, locator: &'a ObjectLocator) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut inner = self.inner.lock().await;
            inner.calls.push(locator.clone());
            if inner.failing_buckets.contains(&locator.bucket) {
                return Err(StorageError::Injected(format!("remove {locator}")));
            }
            inner.objects.remove(locator);
            Ok(())
        })
    }
}
