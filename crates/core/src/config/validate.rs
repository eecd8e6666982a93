use super::{types::AuthMethod, types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Public URL is not blank
/// - Minutes per position is a finite, non-negative number
/// - API key auth has a key
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.server.public_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "server.public_url cannot be empty".to_string(),
        ));
    }

    let minutes = config.queue.minutes_per_position;
    if !minutes.is_finite() || minutes < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "queue.minutes_per_position must be a non-negative number, got {minutes}"
        )));
    }

    if config.auth.method == AuthMethod::ApiKey
        && config.auth.api_key.as_deref().map_or(true, str::is_empty)
    {
        return Err(ConfigError::ValidationError(
            "auth.api_key is required when auth.method = \"api_key\"".to_string(),
        ));
    }

    Ok(())
}
