use std::sync::Arc;
use queuedesk_core::{Authenticator, Config, QueueService, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    authenticator: Arc<dyn Authenticator>,
    queue: QueueService,
}

impl AppState {
    pub fn new(config: Config, authenticator: Arc<dyn Authenticator>, queue: QueueService) -> Self {
        Self {
            config,
            authenticator,
            queue,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn queue(&self) -> &QueueService {
        &self.queue
    }
}
