//! Catalog administration and counter-side operations.

use tracing::info;

use super::{QueueError, QueueService, TicketView};
use crate::catalog::{Service, ServiceId, ServiceName};
use crate::metrics::{SERVICES_CREATED, SERVICES_DELETED, TICKETS_SERVED};

impl QueueService {
    pub fn create_service(&self, name: &str) -> Result<Service, QueueError> {
        let name = ServiceName::parse(name)
            .ok_or_else(|| QueueError::InvalidInput("Service name cannot be empty".to_string()))?;

        let service = self.catalog.create_service(&name)?;

        SERVICES_CREATED.inc();
        info!(service_id = %service.id, name = %service.name, "Service created");
        Ok(service)
    }

    pub fn list_services(&self) -> Result<Vec<Service>, QueueError> {
        Ok(self.catalog.list_services()?)
    }

    /// Remove a service nobody is waiting for.
    ///
    /// Cancelled and served tickets of the service stay in the store with
    /// their last values and report no service name afterwards.
    pub fn delete_service(&self, service_id: ServiceId) -> Result<(), QueueError> {
        let service = self.catalog.delete_service(service_id)?;

        SERVICES_DELETED.inc();
        info!(service_id = %service.id, name = %service.name, "Service deleted");
        Ok(())
    }

    /// Call the oldest waiting ticket of a service to the counter.
    pub fn serve_next(&self, service_id: ServiceId) -> Result<Option<TicketView>, QueueError> {
        let service = self
            .catalog
            .get_service(service_id)?
            .ok_or_else(|| QueueError::service_not_found(service_id))?;

        let Some(ticket) = self.tickets.serve_next(service_id)? else {
            info!(service_id = %service_id, "No ticket waiting");
            return Ok(None);
        };

        TICKETS_SERVED.inc();
        info!(
            ticket_id = %ticket.id,
            ticket_number = %ticket.ticket_number,
            service_id = %service_id,
            "Ticket served"
        );
        Ok(Some(TicketView::new(ticket, Some(service.name))))
    }

    /// Waiting tickets of one service in queue order.
    ///
    /// Positions are computed fresh for the response but not written back.
    pub fn service_queue(&self, service_id: ServiceId) -> Result<Vec<TicketView>, QueueError> {
        let service = self
            .catalog
            .get_service(service_id)?
            .ok_or_else(|| QueueError::service_not_found(service_id))?;

        let waiting = self.tickets.list_waiting(Some(service_id))?;

        Ok(waiting
            .into_iter()
            .zip(1u32..)
            .map(|(ticket, rank)| {
                let slot = self.estimator.slot_at(rank);
                TicketView::new(ticket.with_slot(slot), Some(service.name.clone()))
            })
            .collect())
    }
}
