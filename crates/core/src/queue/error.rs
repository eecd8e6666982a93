use thiserror::Error;

use crate::catalog::CatalogError;
use crate::ticket::TicketError;

/// Failures surfaced by the queue use cases.
#[derive(Debug, Error)]
pub enum QueueError {
    /// A referenced service or ticket does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The operation is illegal in the current state (double cancel, deleting
    /// a service people still wait for).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Persistence failure: {0}")]
    Persistence(String),
}

impl QueueError {
    pub(crate) fn service_not_found(id: crate::ServiceId) -> Self {
        QueueError::NotFound {
            entity: "Service",
            id: id.0,
        }
    }

    pub(crate) fn ticket_not_found(id: crate::TicketId) -> Self {
        QueueError::NotFound {
            entity: "Ticket",
            id: id.0,
        }
    }
}

impl From<TicketError> for QueueError {
    fn from(e: TicketError) -> Self {
        match e {
            TicketError::NotFound(id) => QueueError::ticket_not_found(id),
            TicketError::ServiceNotFound(id) => QueueError::service_not_found(id),
            e @ TicketError::InvalidState { .. } => QueueError::InvalidState(e.to_string()),
            TicketError::Database(msg) => QueueError::Persistence(msg),
        }
    }
}

impl From<CatalogError> for QueueError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => QueueError::service_not_found(id),
            e @ CatalogError::InUse { .. } => QueueError::InvalidState(e.to_string()),
            CatalogError::Database(msg) => QueueError::Persistence(msg),
        }
    }
}
