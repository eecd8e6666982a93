//! Ticket lifecycle: create, cancel and status recomputation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::{QueueError, TicketView, WaitEstimator};
use crate::catalog::{ServiceCatalog, ServiceId};
use crate::metrics::{TICKETS_CANCELLED, TICKETS_CREATED};
use crate::ticket::{NewTicket, Ticket, TicketId, TicketNumber, TicketStatus, TicketStore};

/// Entry point for every queue operation.
///
/// Holds injected handles to the catalog and ticket repositories; it keeps
/// no queue state of its own, so any number of instances may share a store.
pub struct QueueService {
    pub(super) catalog: Arc<dyn ServiceCatalog>,
    pub(super) tickets: Arc<dyn TicketStore>,
    pub(super) estimator: WaitEstimator,
}

impl QueueService {
    pub fn new(
        catalog: Arc<dyn ServiceCatalog>,
        tickets: Arc<dyn TicketStore>,
        estimator: WaitEstimator,
    ) -> Self {
        Self {
            catalog,
            tickets,
            estimator,
        }
    }

    pub fn estimator(&self) -> WaitEstimator {
        self.estimator
    }

    /// Issue a ticket at the back of a service's queue.
    pub fn create_ticket(&self, service_id: ServiceId) -> Result<TicketView, QueueError> {
        let service = self
            .catalog
            .get_service(service_id)?
            .ok_or_else(|| QueueError::service_not_found(service_id))?;

        let now = Utc::now();
        let new_ticket = NewTicket {
            ticket_number: TicketNumber::generate(now),
            service_id,
            created_at: now,
        };

        let estimator = self.estimator;
        let ticket = self
            .tickets
            .create_ticket(new_ticket, &|waiting: u32| estimator.slot_after(waiting))?;

        TICKETS_CREATED.inc();
        info!(
            ticket_id = %ticket.id,
            ticket_number = %ticket.ticket_number,
            service_id = %service_id,
            position = ticket.queue_position,
            "Ticket issued"
        );

        Ok(TicketView::new(ticket, Some(service.name)))
    }

    /// Cancel a waiting ticket.
    ///
    /// Tickets behind it are not renumbered here; they pick up the gap the
    /// next time they are read.
    pub fn cancel_ticket(&self, ticket_id: TicketId) -> Result<(), QueueError> {
        let ticket = self.tickets.cancel_ticket(ticket_id)?;

        TICKETS_CANCELLED.inc();
        info!(
            ticket_id = %ticket.id,
            service_id = %ticket.service_id,
            "Ticket cancelled"
        );

        Ok(())
    }

    /// Current view of a ticket, recomputing its position if it is waiting.
    pub fn ticket_status(&self, ticket_id: TicketId) -> Result<TicketView, QueueError> {
        let ticket = self
            .tickets
            .get_ticket(ticket_id)?
            .ok_or_else(|| QueueError::ticket_not_found(ticket_id))?;

        let ticket = if ticket.status == TicketStatus::Waiting {
            self.refresh(ticket)?
        } else {
            ticket
        };

        let service_name = self.catalog.get_service(ticket.service_id)?.map(|s| s.name);
        Ok(TicketView::new(ticket, service_name))
    }

    /// Recompute a waiting ticket's slot from its rank and persist it.
    fn refresh(&self, ticket: Ticket) -> Result<Ticket, QueueError> {
        let rank = self
            .tickets
            .waiting_count(ticket.service_id, Some(ticket.id))?
            .max(1);
        let slot = self.estimator.slot_at(rank);

        if slot != ticket.slot() {
            debug!(
                ticket_id = %ticket.id,
                from = ticket.queue_position,
                to = slot.position,
                "Queue position moved"
            );
            self.tickets.update_wait_and_position(ticket.id, slot)?;
        }

        Ok(ticket.with_slot(slot))
    }
}
