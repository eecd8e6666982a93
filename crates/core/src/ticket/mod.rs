//! Tickets issued to visitors waiting for a service.

mod store;
mod types;

pub use store::{TicketError, TicketStore};
pub use types::{NewTicket, QueueSlot, Ticket, TicketId, TicketNumber, TicketStatus};
