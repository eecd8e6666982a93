use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::Credentials;
use crate::config::AuthMethod;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingCredentials,

    #[error("Invalid API key")]
    InvalidKey,

    #[error("Authentication misconfigured: {0}")]
    Misconfigured(String),
}

/// Who is operating the desk: the caller allowed onto admin routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operator {
    pub name: String,
    pub method: AuthMethod,
}

impl Operator {
    /// Operator admitted when no authentication is configured.
    pub fn unverified() -> Self {
        Self {
            name: "unverified".to_string(),
            method: AuthMethod::None,
        }
    }
}

/// Gatekeeper for staff-only operations.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Operator, AuthError>;

    fn method(&self) -> AuthMethod;
}

/// Admits every caller. Only used when `[auth] method = "none"`.
#[derive(Debug, Default)]
pub struct OpenAccess;

#[async_trait]
impl Authenticator for OpenAccess {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<Operator, AuthError> {
        Ok(Operator::unverified())
    }

    fn method(&self) -> AuthMethod {
        AuthMethod::None
    }
}
