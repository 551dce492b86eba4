use std::collections::HashMap;

use relatoria_core::BoxFuture;

use crate::error::AuthError;
use crate::{AuthUser, AuthVerifier};

/// Fixed token → user table. Used for local runs and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticTokens {
    users: HashMap<String, AuthUser>,
}

impl StaticTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.users.insert(
            token.into(),
            AuthUser {
                id: user_id.into(),
                email: None,
            },
        );
        self
    }
}

impl AuthVerifier for StaticTokens {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<AuthUser, AuthError>> {
        let result = self
            .users
            .get(token)
            .cloned()
            .ok_or_else(|| AuthError::InvalidToken("unknown token".to_string()));
        Box::pin(async move { result })
    }
}
