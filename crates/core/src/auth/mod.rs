//! Admin-route authentication.
//!
//! Visitors never authenticate; only staff operations (catalog changes and
//! calling the next ticket) go through an [`Authenticator`].

mod api_key;
mod authenticator;
mod credentials;

pub use api_key::ApiKeyAuthenticator;
pub use authenticator::{AuthError, Authenticator, OpenAccess, Operator};
pub use credentials::Credentials;

use std::sync::Arc;

use crate::config::{AuthConfig, AuthMethod};

/// Build the authenticator selected by `[auth] method`.
pub fn create_authenticator(config: &AuthConfig) -> Result<Arc<dyn Authenticator>, AuthError> {
    match config.method {
        AuthMethod::None => Ok(Arc::new(OpenAccess)),
        AuthMethod::ApiKey => {
            let key = config
                .api_key
                .as_deref()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| {
                    AuthError::Misconfigured("auth.api_key is not set".to_string())
                })?;
            Ok(Arc::new(ApiKeyAuthenticator::new(key)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_open_access() {
        let config = AuthConfig {
            method: AuthMethod::None,
            api_key: None,
        };
        let auth = create_authenticator(&config).unwrap();
        assert_eq!(auth.method(), AuthMethod::None);
    }

    #[tokio::test]
    async fn test_create_api_key() {
        let config = AuthConfig {
            method: AuthMethod::ApiKey,
            api_key: Some("desk-key".to_string()),
        };
        let auth = create_authenticator(&config).unwrap();
        assert_eq!(auth.method(), AuthMethod::ApiKey);

        let creds = Credentials::from_headers([("X-API-Key", "desk-key")]);
        assert!(auth.authenticate(&creds).await.is_ok());
    }

    #[test]
    fn test_create_api_key_without_key() {
        for api_key in [None, Some(String::new())] {
            let config = AuthConfig {
                method: AuthMethod::ApiKey,
                api_key,
            };
            assert!(matches!(
                create_authenticator(&config),
                Err(AuthError::Misconfigured(_))
            ));
        }
    }
}
