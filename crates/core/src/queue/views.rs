use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::ServiceId;
use crate::ticket::{Ticket, TicketId, TicketNumber, TicketStatus};

/// A ticket joined with the name of its service, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketView {
    pub id: TicketId,
    pub ticket_number: TicketNumber,
    pub service_id: ServiceId,
    /// `None` once the service has been deleted.
    pub service_name: Option<String>,
    pub status: TicketStatus,
    pub estimated_wait_time: f64,
    pub queue_position: u32,
    pub created_at: DateTime<Utc>,
}

impl TicketView {
    pub fn new(ticket: Ticket, service_name: Option<String>) -> Self {
        Self {
            id: ticket.id,
            ticket_number: ticket.ticket_number,
            service_id: ticket.service_id,
            service_name,
            status: ticket.status,
            estimated_wait_time: ticket.estimated_wait_time,
            queue_position: ticket.queue_position,
            created_at: ticket.created_at,
        }
    }
}

/// One line of the queue status board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueEntry {
    pub ticket_number: TicketNumber,
    pub service_name: Option<String>,
    pub status: TicketStatus,
    pub estimated_wait_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueStats {
    pub total_tickets: usize,
    /// Mean estimated wait in minutes, rounded to 2 decimals. 0 when empty.
    pub avg_wait_time: f64,
}

/// Every waiting ticket across services, with summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueStatus {
    pub tickets: Vec<QueueEntry>,
    pub stats: QueueStats,
}
