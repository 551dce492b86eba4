use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,

    #[error("missing token")]
    MissingToken,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("auth service error: {0}")]
    Service(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    /// True when the credential itself was rejected, as opposed to the
    /// auth service being unreachable.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Service(_))
    }
}
