use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use relatoria_core::BoxFuture;

use crate::error::AuthError;
use crate::{AuthUser, AuthVerifier};

/// Verifies tokens by asking the backend auth service who they belong to.
///
/// Every call costs one round trip to `GET {base_url}/auth/v1/user`.
#[derive(Clone)]
pub struct RemoteAuth {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

#[derive(Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl RemoteAuth {
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

    pub fn user_url(&self) -> String {
        format!("{}/auth/v1/user", self.base_url)
    }

    async fn fetch_user(&self, token: &str) -> Result<AuthUser, AuthError> {
        let resp = self
            .http
            .get(self.user_url())
            .header("apikey", &self.service_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Service(e.to_string()))?;

        match resp.status() {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = resp.text().await.unwrap_or_default();
                return Err(AuthError::InvalidToken(body));
            }
            s => return Err(AuthError::Service(format!("auth service returned {s}"))),
        }

        let user: UserResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::Service(e.to_string()))?;
        debug!(user_id = %user.id, "token verified remotely");

        Ok(AuthUser {
            id: user.id,
            email: user.email,
        })
    }
}

impl AuthVerifier for RemoteAuth {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<AuthUser, AuthError>> {
        Box::pin(self.fetch_user(token))
    }
}
