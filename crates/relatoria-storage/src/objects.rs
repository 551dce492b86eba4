use serde::Serialize;
use tracing::debug;

use relatoria_core::BoxFuture;
use relatoria_core::locator::ObjectLocator;

use crate::ObjectStore;
use crate::error::StorageError;

/// Object access over `{base_url}/storage/v1`, authenticated with the
/// privileged service key.
#[derive(Clone)]
pub struct RemoteObjectStore {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

#[derive(Serialize)]
struct RemoveBody<'a> {
    prefixes: [&'a str; 1],
}

impl RemoteObjectStore {
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    pub fn bucket_url(&self, bucket: &str) -> String {
        format!("{}/storage/v1/object/{bucket}", self.base_url)
    }

    /// Delete an object from its bucket.
    pub async fn remove_object(&self, locator: &ObjectLocator) -> Result<(), StorageError> {
        let resp = self
            .http
            .delete(self.bucket_url(&locator.bucket))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&RemoveBody {
                prefixes: [locator.key.as_str()],
            })
            .send()
            .await
            .map_err(|e| StorageError::Transport {
                locator: locator.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(StorageError::Remove {
                locator: locator.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        debug!(bucket = %locator.bucket, key = %locator.key, "object removed");
        Ok(())
    }
}

impl ObjectStore for RemoteObjectStore {
    fn remove<'a>(&'a self, locator: &'a ObjectLocator) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(self.remove_object(locator))
    }
}
