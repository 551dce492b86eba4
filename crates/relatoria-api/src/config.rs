use std::env;
use std::time::Duration;

use relatoria_core::locator::{BucketRules, DATASET_BUCKET, DEFAULT_PDF_BUCKET};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub backend_url: String,
    /// Privileged credential for the backend. Never sent to clients.
    pub service_key: String,
    /// When set, bearer tokens are verified locally instead of remotely.
    pub jwt_secret: Option<String>,
    pub port: u16,
    pub backend_timeout: Duration,
    pub buckets: BucketRules,
    pub environment: String,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key → value source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let (Some(backend_url), Some(service_key)) =
            (get("SUPABASE_URL"), get("SUPABASE_SERVICE_ROLE_KEY"))
        else {
            return Err(eyre::eyre!(
                "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY are required"
            ));
        };

        let port = match get("PORT") {
            Some(p) => p
                .parse()
                .map_err(|e| eyre::eyre!("invalid PORT {p:?}: {e}"))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get("BACKEND_TIMEOUT_SECS") {
            Some(t) => t
                .parse()
                .map_err(|e| eyre::eyre!("invalid BACKEND_TIMEOUT_SECS {t:?}: {e}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let pdf_buckets = get("PDF_BUCKETS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|b| !b.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_PDF_BUCKET.to_string()]);

        Ok(Self {
            backend_url,
            service_key,
            jwt_secret: get("SUPABASE_JWT_SECRET"),
            port,
            backend_timeout: Duration::from_secs(timeout_secs),
            buckets: BucketRules {
                pdf_buckets,
                default_pdf_bucket: get("DEFAULT_PDF_BUCKET")
                    .unwrap_or_else(|| DEFAULT_PDF_BUCKET.to_string()),
                dataset_bucket: get("DATASET_BUCKET").unwrap_or_else(|| DATASET_BUCKET.to_string()),
            },
            environment: get("RELATORIA_ENV").unwrap_or_else(|| "dev".to_string()),
        })
    }
}
