use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use relatoria_auth::bearer::token_from_header;

use crate::error::ApiError;
use crate::state::AppState;

/// Bearer token middleware.
///
/// Extracts the `Authorization: Bearer <token>` header and resolves it with
/// the configured verifier. On success, inserts `AuthUser` into request
/// extensions for handlers to use.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        token_from_header(header)?.to_string()
    };

    let user = state.auth.verify(&token).await?;
    tracing::debug!(user_id = %user.id, "user authenticated");

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
