pub mod beta;
pub mod dataset;
pub mod health;
pub mod report;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use relatoria_core::models::id::RecordId;

use crate::error::ApiError;

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

/// Parse an optional JSON body. An empty body yields `T::default()`.
pub(crate) fn parse_json_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "invalid JSON body");
        ApiError::invalid_json()
    })
}

/// First non-blank id among the accepted parameter aliases, in order.
pub(crate) fn first_id(candidates: impl IntoIterator<Item = Option<String>>) -> Option<RecordId> {
    candidates
        .into_iter()
        .flatten()
        .find_map(|raw| RecordId::parse(&raw))
}
