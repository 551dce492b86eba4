//! relatoria-api
//!
//! HTTP surface of the RelatorIA backend: validates requests, authenticates
//! the caller, and hands off to the report lifecycle controller.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Protected routes
    let protected = Router::new()
        .route("/api/dataset/get_sample", get(routes::dataset::get_sample))
        .route("/api/report", post(routes::report::create_report))
        .route("/api/report/status", get(routes::report::report_status))
        .route("/api/report/delete", delete(routes::report::delete_report))
        .route(
            "/api/report/regenerate_report",
            post(routes::report::regenerate_report),
        )
        .method_not_allowed_fallback(routes::method_not_allowed)
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        // Health (no auth)
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        // Beta sign-up (no auth)
        .route("/api/beta", post(routes::beta::create_lead))
        .method_not_allowed_fallback(routes::method_not_allowed)
        .merge(protected)
        .fallback(routes::not_found)
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
        .with_state(state)
}
