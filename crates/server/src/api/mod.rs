pub mod error;
pub mod handlers;
pub mod middleware;
pub mod qr;
pub mod queue;
pub mod routes;
pub mod services;
pub mod tickets;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;

use serde::Serialize;

/// Acknowledgement body for operations without a payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
