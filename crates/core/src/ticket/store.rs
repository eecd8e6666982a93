//! Ticket storage trait and error type.

use thiserror::Error;

use crate::catalog::ServiceId;
use crate::ticket::{NewTicket, QueueSlot, Ticket, TicketId, TicketStatus};

/// Error type for ticket storage operations.
#[derive(Debug, Error)]
pub enum TicketError {
    /// Ticket not found.
    #[error("Ticket not found: {0}")]
    NotFound(TicketId),

    /// The service a new ticket refers to does not exist.
    #[error("Service not found: {0}")]
    ServiceNotFound(ServiceId),

    /// Cannot perform operation due to current status.
    #[error("Cannot {operation} ticket {ticket_id}: current status is {current}")]
    InvalidState {
        ticket_id: TicketId,
        current: TicketStatus,
        operation: &'static str,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

/// Trait for ticket storage backends.
pub trait TicketStore: Send + Sync {
    /// Append a waiting ticket to its service queue.
    ///
    /// Counts the waiting tickets of `ticket.service_id`, hands the count to
    /// `assign` to obtain the new ticket's slot and inserts the row, all as
    /// one atomic step: concurrent calls for the same service never observe
    /// the same count.
    fn create_ticket(
        &self,
        ticket: NewTicket,
        assign: &dyn Fn(u32) -> QueueSlot,
    ) -> Result<Ticket, TicketError>;

    /// Get a ticket by ID.
    fn get_ticket(&self, id: TicketId) -> Result<Option<Ticket>, TicketError>;

    /// Count waiting tickets of a service.
    ///
    /// With `up_to` set, only tickets created no later than that ticket are
    /// counted, which makes the count the 1-based rank of `up_to`.
    fn waiting_count(
        &self,
        service_id: ServiceId,
        up_to: Option<TicketId>,
    ) -> Result<u32, TicketError>;

    /// Transition a waiting ticket to `cancelled`.
    fn cancel_ticket(&self, id: TicketId) -> Result<Ticket, TicketError>;

    /// Persist a recomputed position and wait time.
    fn update_wait_and_position(&self, id: TicketId, slot: QueueSlot) -> Result<(), TicketError>;

    /// List waiting tickets in creation order, optionally for one service.
    fn list_waiting(&self, service_id: Option<ServiceId>) -> Result<Vec<Ticket>, TicketError>;

    /// Mark the oldest waiting ticket of a service as `served`.
    ///
    /// Returns `None` when nobody is waiting.
    fn serve_next(&self, service_id: ServiceId) -> Result<Option<Ticket>, TicketError>;
}
