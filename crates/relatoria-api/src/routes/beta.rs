use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use relatoria_core::models::lead::NewLead;
use relatoria_core::models::responses::SuccessBody;

use crate::error::ApiError;
use crate::routes::parse_json_body;
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct LeadPayload {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Register a beta lead. No deduplication.
pub async fn create_lead(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SuccessBody>), ApiError> {
    let payload: LeadPayload = parse_json_body(&body)?;

    let lead = NewLead::parse(payload.name.as_deref(), payload.email.as_deref()).inspect_err(
        |e| tracing::warn!(error = %e, "lead rejected"),
    )?;

    state.leads.insert_lead(&lead).await.map_err(|e| {
        tracing::error!(error = %e, "lead insert failed");
        ApiError::Internal("Failed to store lead".to_string())
    })?;

    tracing::info!(email = %lead.email, "lead stored");
    Ok((StatusCode::CREATED, Json(SuccessBody { success: true })))
}
