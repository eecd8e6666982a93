//! Core ticket data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ServiceId;

/// Store-assigned identity of a ticket. Ids grow with creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub i64);

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable ticket number shown to visitors.
///
/// Format: `T<YYYYMMDDHHMMSS>-<4 hex>`. Display only, the store id is the
/// real identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketNumber(String);

impl TicketNumber {
    /// Build a number from the creation time plus a random suffix, so two
    /// tickets issued within the same second still read differently.
    pub fn generate(created_at: DateTime<Utc>) -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!(
            "T{}-{}",
            created_at.format("%Y%m%d%H%M%S"),
            suffix[..4].to_uppercase()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TicketNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// In the queue.
    Waiting,
    /// Withdrawn by the visitor. Terminal.
    Cancelled,
    /// Called to the counter. Terminal.
    Served,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Waiting => "waiting",
            TicketStatus::Cancelled => "cancelled",
            TicketStatus::Served => "served",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TicketStatus::Waiting)
    }

    /// Returns true if the ticket can be cancelled from this status.
    pub fn can_cancel(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(TicketStatus::Waiting),
            "cancelled" => Ok(TicketStatus::Cancelled),
            "served" => Ok(TicketStatus::Served),
            other => Err(format!("unknown ticket status: {}", other)),
        }
    }
}

/// Position in a service queue together with its estimated wait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueueSlot {
    /// 1-based rank among waiting tickets of the service.
    pub position: u32,
    /// Estimated wait in minutes.
    pub estimated_wait_time: f64,
}

/// A visitor's claim on a position in a service queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    pub id: TicketId,
    pub ticket_number: TicketNumber,
    pub service_id: ServiceId,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    /// Minutes, as of the last recomputation.
    pub estimated_wait_time: f64,
    /// As of the last recomputation.
    pub queue_position: u32,
}

impl Ticket {
    pub fn slot(&self) -> QueueSlot {
        QueueSlot {
            position: self.queue_position,
            estimated_wait_time: self.estimated_wait_time,
        }
    }

    pub fn with_slot(self, slot: QueueSlot) -> Self {
        Self {
            queue_position: slot.position,
            estimated_wait_time: slot.estimated_wait_time,
            ..self
        }
    }
}

/// Fields of a ticket that exist before the store has queued it.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub ticket_number: TicketNumber,
    pub service_id: ServiceId,
    pub created_at: DateTime<Utc>,
}
