use async_trait::async_trait;

use super::{AuthError, Authenticator, Credentials, Operator};
use crate::config::AuthMethod;

/// Admits callers presenting the configured shared key.
pub struct ApiKeyAuthenticator {
    key: String,
}

impl ApiKeyAuthenticator {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[async_trait]
impl Authenticator for ApiKeyAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Operator, AuthError> {
        let presented = credentials
            .api_key
            .as_deref()
            .ok_or(AuthError::MissingCredentials)?;

        if !keys_match(presented.as_bytes(), self.key.as_bytes()) {
            return Err(AuthError::InvalidKey);
        }

        Ok(Operator {
            name: "desk-staff".to_string(),
            method: AuthMethod::ApiKey,
        })
    }

    fn method(&self) -> AuthMethod {
        AuthMethod::ApiKey
    }
}

/// Compare without short-circuiting on the first differing byte.
fn keys_match(presented: &[u8], expected: &[u8]) -> bool {
    let diff = presented
        .iter()
        .zip(expected)
        .fold(presented.len() ^ expected.len(), |acc, (a, b)| {
            acc | usize::from(a ^ b)
        });
    diff == 0
}
