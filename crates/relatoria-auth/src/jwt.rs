use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use relatoria_core::BoxFuture;

use crate::error::AuthError;
use crate::{AuthUser, AuthVerifier};

/// Claims carried by a backend-issued user access token.
#[derive(Debug, Deserialize)]
pub struct AccessClaims {
    #[serde(default)]
    pub sub: String,
    pub exp: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Verifies HS256 access tokens locally with the project's JWT secret.
///
/// Only end-user tokens are accepted: the anonymous and service-role keys
/// are valid JWTs too, but carry no user.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub const AUDIENCE: &'static str = "authenticated";

    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[Self::AUDIENCE]);
        validation.validate_exp = true;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn validate(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let data = decode::<AccessClaims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::Jwt(e),
            }
        })?;

        let claims = data.claims;
        if claims.role.as_deref() != Some(Self::AUDIENCE) {
            return Err(AuthError::InvalidToken(format!(
                "unexpected role: {}",
                claims.role.as_deref().unwrap_or("none")
            )));
        }
        if claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("token has no subject".to_string()));
        }

        Ok(claims)
    }
}

impl AuthVerifier for JwtVerifier {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<AuthUser, AuthError>> {
        Box::pin(async move {
            let claims = self.validate(token)?;
            Ok(AuthUser {
                id: claims.sub,
                email: claims.email,
            })
        })
    }
}
