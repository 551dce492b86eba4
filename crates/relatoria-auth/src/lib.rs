//! relatoria-auth
//!
//! Bearer credential verification against the backend's auth service.

pub mod bearer;
pub mod client;
pub mod error;
pub mod jwt;
pub mod static_tokens;

use relatoria_core::BoxFuture;

use crate::error::AuthError;

/// Identity resolved from a verified credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// Resolves a raw bearer token to a user identity.
pub trait AuthVerifier: Send + Sync {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<AuthUser, AuthError>>;
}
