use std::sync::Arc;

use relatoria_auth::AuthVerifier;
use relatoria_auth::client::RemoteAuth;
use relatoria_auth::jwt::JwtVerifier;
use relatoria_lifecycle::controller::ReportLifecycle;
use relatoria_storage::objects::RemoteObjectStore;
use relatoria_store::LeadStore;
use relatoria_store::postgrest::PostgrestStore;

use crate::config::ApiConfig;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Built once at startup; every collaborator is behind a trait object so
/// tests can swap in the in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthVerifier>,
    pub lifecycle: Arc<ReportLifecycle>,
    pub leads: Arc<dyn LeadStore>,
    pub environment: String,
}

impl AppState {
    /// Wire the backend-service clients. One HTTP client (and its
    /// connection pool) is shared by all of them.
    pub fn connect(config: &ApiConfig) -> eyre::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.backend_timeout)
            .build()?;

        let auth: Arc<dyn AuthVerifier> = match &config.jwt_secret {
            Some(secret) => Arc::new(JwtVerifier::new(secret)),
            None => Arc::new(RemoteAuth::with_client(
                http.clone(),
                &config.backend_url,
                &config.service_key,
            )),
        };

        let store = Arc::new(PostgrestStore::with_client(
            http.clone(),
            &config.backend_url,
            &config.service_key,
        ));
        let objects = Arc::new(RemoteObjectStore::with_client(
            http,
            &config.backend_url,
            &config.service_key,
        ));

        Ok(Self {
            auth,
            lifecycle: Arc::new(ReportLifecycle::new(
                store.clone(),
                objects,
                config.buckets.clone(),
            )),
            leads: store,
            environment: config.environment.clone(),
        })
    }
}
