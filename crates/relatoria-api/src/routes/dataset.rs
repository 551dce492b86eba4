use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use relatoria_auth::AuthUser;
use relatoria_core::models::responses::DatasetSampleResponse;

use crate::error::{ApiError, ErrorText};
use crate::routes::first_id;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SampleQuery {
    pub report_request_id: Option<String>,
    #[serde(rename = "reportRequestId")]
    pub report_request_id_camel: Option<String>,
    pub id: Option<String>,
}

pub async fn get_sample(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<SampleQuery>, QueryRejection>,
) -> Result<Json<DatasetSampleResponse>, ApiError> {
    let Query(query) = query?;
    let report_id = first_id([query.report_request_id, query.report_request_id_camel, query.id])
        .ok_or_else(|| ApiError::BadRequest("report_request_id is required".to_string()))?;

    let sample_json = state
        .lifecycle
        .dataset_sample(&report_id, &user.id)
        .await
        .map_err(|e| ApiError::lifecycle(e, &ErrorText::SAMPLE))?;

    Ok(Json(DatasetSampleResponse { sample_json }))
}
