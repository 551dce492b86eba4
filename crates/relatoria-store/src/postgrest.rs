use std::fmt::Display;

use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use relatoria_core::BoxFuture;
use relatoria_core::models::dataset::Dataset;
use relatoria_core::models::history::ReportHistoryRecord;
use relatoria_core::models::id::RecordId;
use relatoria_core::models::lead::NewLead;
use relatoria_core::models::report::{NewReportRequest, ReportRequest, ReportReset};

use crate::error::StoreError;
use crate::{
    DATASETS_TABLE, HISTORY_TABLE, LEADS_TABLE, LeadStore, REPORTS_TABLE, ReportStore,
};

const RETURN_REPRESENTATION: &str = "return=representation";
const RETURN_MINIMAL: &str = "return=minimal";

/// Table access over the backend's PostgREST endpoint (`{base_url}/rest/v1`),
/// authenticated with the privileged service key.
#[derive(Clone)]
pub struct PostgrestStore {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

#[derive(Deserialize)]
struct IdRow {
    id: RecordId,
}

#[derive(Deserialize)]
struct PostgrestErrorBody {
    message: String,
}

fn eq(value: impl Display) -> String {
    format!("eq.{value}")
}

fn version_filter(expected: Option<i64>) -> String {
    match expected {
        Some(v) => eq(v),
        None => "is.null".to_string(),
    }
}

impl PostgrestStore {
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

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn send(
        &self,
        table: &'static str,
        req: RequestBuilder,
    ) -> Result<reqwest::Response, StoreError> {
        let resp = req.send().await.map_err(|e| StoreError::Transport {
            table,
            message: e.to_string(),
        })?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<PostgrestErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);
        Err(StoreError::Rejected {
            table,
            status: status.as_u16(),
            message,
        })
    }

    async fn send_rows<T: DeserializeOwned>(
        &self,
        table: &'static str,
        req: RequestBuilder,
    ) -> Result<Vec<T>, StoreError> {
        self.send(table, req)
            .await?
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::Decode {
                table,
                message: e.to_string(),
            })
    }

    async fn fetch_one<T: DeserializeOwned>(
        &self,
        table: &'static str,
        id: &RecordId,
    ) -> Result<Option<T>, StoreError> {
        let req = self
            .request(Method::GET, table)
            .query(&[("id", eq(id)), ("select", "*".to_string()), ("limit", "1".to_string())]);
        let rows = self.send_rows::<T>(table, req).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_returning<T: DeserializeOwned>(
        &self,
        table: &'static str,
        body: &(impl serde::Serialize + Sync),
        select: &str,
    ) -> Result<T, StoreError> {
        let req = self
            .request(Method::POST, table)
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&[("select", select)])
            .json(body);
        self.send_rows::<T>(table, req)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode {
                table,
                message: "insert returned no rows".to_string(),
            })
    }
}

impl ReportStore for PostgrestStore {
    fn fetch_report<'a>(
        &'a self,
        id: &'a RecordId,
    ) -> BoxFuture<'a, Result<Option<ReportRequest>, StoreError>> {
        Box::pin(self.fetch_one(REPORTS_TABLE, id))
    }

    fn insert_report<'a>(
        &'a self,
        report: &'a NewReportRequest,
    ) -> BoxFuture<'a, Result<ReportRequest, StoreError>> {
        Box::pin(self.insert_returning(REPORTS_TABLE, report, "*"))
    }

    fn insert_history<'a>(
        &'a self,
        record: &'a ReportHistoryRecord,
    ) -> BoxFuture<'a, Result<RecordId, StoreError>> {
        Box::pin(async move {
            let row: IdRow = self.insert_returning(HISTORY_TABLE, record, "id").await?;
            debug!(history_id = %row.id, original_id = %record.original_id, "history row inserted");
            Ok(row.id)
        })
    }

    fn reset_report<'a>(
        &'a self,
        id: &'a RecordId,
        expected_version: Option<i64>,
        reset: &'a ReportReset,
    ) -> BoxFuture<'a, Result<Option<ReportRequest>, StoreError>> {
        Box::pin(async move {
            let req = self
                .request(Method::PATCH, REPORTS_TABLE)
                .header("Prefer", RETURN_REPRESENTATION)
                .query(&[("id", eq(id)), ("version", version_filter(expected_version))])
                .json(reset);
            let rows = self.send_rows::<ReportRequest>(REPORTS_TABLE, req).await?;
            Ok(rows.into_iter().next())
        })
    }

    fn delete_report<'a>(
        &'a self,
        id: &'a RecordId,
        expected_version: Option<i64>,
    ) -> BoxFuture<'a, Result<bool, StoreError>> {
        Box::pin(async move {
            let req = self
                .request(Method::DELETE, REPORTS_TABLE)
                .header("Prefer", RETURN_REPRESENTATION)
                .query(&[
                    ("id", eq(id)),
                    ("version", version_filter(expected_version)),
                    ("select", "id".to_string()),
                ]);
            let rows = self.send_rows::<IdRow>(REPORTS_TABLE, req).await?;
            Ok(!rows.is_empty())
        })
    }

    fn fetch_dataset<'a>(
        &'a self,
        id: &'a RecordId,
    ) -> BoxFuture<'a, Result<Option<Dataset>, StoreError>> {
        Box::pin(self.fetch_one(DATASETS_TABLE, id))
    }

    fn delete_dataset<'a>(&'a self, id: &'a RecordId) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let req = self
                .request(Method::DELETE, DATASETS_TABLE)
                .header("Prefer", RETURN_MINIMAL)
                .query(&[("id", eq(id))]);
            self.send(DATASETS_TABLE, req).await?;
            Ok(())
        })
    }
}

impl LeadStore for PostgrestStore {
    fn insert_lead<'a>(&'a self, lead: &'a NewLead) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let req = self
                .request(Method::POST, LEADS_TABLE)
                .header("Prefer", RETURN_MINIMAL)
                .json(lead);
            self.send(LEADS_TABLE, req).await?;
            Ok(())
        })
    }
}
