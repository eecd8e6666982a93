//! In-memory implementation of both repository traits.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::catalog::{CatalogError, Service, ServiceCatalog, ServiceId, ServiceName};
use crate::ticket::{
    NewTicket, QueueSlot, Ticket, TicketError, TicketId, TicketStatus, TicketStore,
};

const INJECTED_FAILURE: &str = "injected write failure";

#[derive(Debug, Default)]
struct State {
    services: BTreeMap<ServiceId, Service>,
    tickets: BTreeMap<TicketId, Ticket>,
    last_service_id: i64,
    last_ticket_id: i64,
}

impl State {
    fn waiting_count(&self, service_id: ServiceId, up_to: Option<TicketId>) -> u32 {
        let count = self
            .tickets
            .values()
            .filter(|t| t.service_id == service_id && t.status == TicketStatus::Waiting)
            .filter(|t| up_to.map_or(true, |limit| t.id <= limit))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

/// Mock store backed by ordered maps.
///
/// Ids are handed out sequentially and never reused, matching the SQLite
/// store. Each trait call holds one lock for its whole duration, so calls are
/// atomic with respect to each other.
#[derive(Debug, Default)]
pub struct InMemoryQueueStore {
    state: Mutex<State>,
    fail_writes: AtomicBool,
}

impl InMemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every mutating call fail with a database error until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of tickets in any status.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn ticket_count(&self) -> usize {
        self.state
            .lock()
            .expect("state mutex poisoned")
            .tickets
            .len()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state
            .lock()
            .map_err(|_| "state mutex poisoned".to_string())
    }

    fn check_writable(&self) -> Result<(), String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(INJECTED_FAILURE.to_string())
        } else {
            Ok(())
        }
    }
}

impl ServiceCatalog for InMemoryQueueStore {
    fn create_service(&self, name: &ServiceName) -> Result<Service, CatalogError> {
        self.check_writable().map_err(CatalogError::Database)?;
        let mut state = self.state().map_err(CatalogError::Database)?;

        state.last_service_id += 1;
        let service = Service {
            id: ServiceId(state.last_service_id),
            name: name.as_str().to_string(),
        };
        state.services.insert(service.id, service.clone());
        Ok(service)
    }

    fn get_service(&self, id: ServiceId) -> Result<Option<Service>, CatalogError> {
        let state = self.state().map_err(CatalogError::Database)?;
        Ok(state.services.get(&id).cloned())
    }

    fn list_services(&self) -> Result<Vec<Service>, CatalogError> {
        let state = self.state().map_err(CatalogError::Database)?;
        Ok(state.services.values().cloned().collect())
    }

    fn delete_service(&self, id: ServiceId) -> Result<Service, CatalogError> {
        self.check_writable().map_err(CatalogError::Database)?;
        let mut state = self.state().map_err(CatalogError::Database)?;

        if !state.services.contains_key(&id) {
            return Err(CatalogError::NotFound(id));
        }
        let waiting = state.waiting_count(id, None);
        if waiting > 0 {
            return Err(CatalogError::InUse {
                service_id: id,
                waiting,
            });
        }

        state.services.remove(&id).ok_or(CatalogError::NotFound(id))
    }
}

impl TicketStore for InMemoryQueueStore {
    fn create_ticket(
        &self,
        ticket: NewTicket,
        assign: &dyn Fn(u32) -> QueueSlot,
    ) -> Result<Ticket, TicketError> {
        self.check_writable().map_err(TicketError::Database)?;
        let mut state = self.state().map_err(TicketError::Database)?;

        if !state.services.contains_key(&ticket.service_id) {
            return Err(TicketError::ServiceNotFound(ticket.service_id));
        }

        let slot = assign(state.waiting_count(ticket.service_id, None));
        state.last_ticket_id += 1;
        let created = Ticket {
            id: TicketId(state.last_ticket_id),
            ticket_number: ticket.ticket_number,
            service_id: ticket.service_id,
            status: TicketStatus::Waiting,
            created_at: ticket.created_at,
            estimated_wait_time: slot.estimated_wait_time,
            queue_position: slot.position,
        };
        state.tickets.insert(created.id, created.clone());
        Ok(created)
    }

    fn get_ticket(&self, id: TicketId) -> Result<Option<Ticket>, TicketError> {
        let state = self.state().map_err(TicketError::Database)?;
        Ok(state.tickets.get(&id).cloned())
    }

    fn waiting_count(
        &self,
        service_id: ServiceId,
        up_to: Option<TicketId>,
    ) -> Result<u32, TicketError> {
        let state = self.state().map_err(TicketError::Database)?;
        Ok(state.waiting_count(service_id, up_to))
    }

    fn cancel_ticket(&self, id: TicketId) -> Result<Ticket, TicketError> {
        self.check_writable().map_err(TicketError::Database)?;
        let mut state = self.state().map_err(TicketError::Database)?;

        let ticket = state
            .tickets
            .get_mut(&id)
            .ok_or(TicketError::NotFound(id))?;
        if !ticket.status.can_cancel() {
            return Err(TicketError::InvalidState {
                ticket_id: id,
                current: ticket.status,
                operation: "cancel",
            });
        }
        ticket.status = TicketStatus::Cancelled;
        Ok(ticket.clone())
    }

    fn update_wait_and_position(&self, id: TicketId, slot: QueueSlot) -> Result<(), TicketError> {
        self.check_writable().map_err(TicketError::Database)?;
        let mut state = self.state().map_err(TicketError::Database)?;

        let ticket = state
            .tickets
            .get_mut(&id)
            .ok_or(TicketError::NotFound(id))?;
        ticket.queue_position = slot.position;
        ticket.estimated_wait_time = slot.estimated_wait_time;
        Ok(())
    }

    fn list_waiting(&self, service_id: Option<ServiceId>) -> Result<Vec<Ticket>, TicketError> {
        let state = self.state().map_err(TicketError::Database)?;
        Ok(state
            .tickets
            .values()
            .filter(|t| t.status == TicketStatus::Waiting)
            .filter(|t| service_id.map_or(true, |id| t.service_id == id))
            .cloned()
            .collect())
    }

    fn serve_next(&self, service_id: ServiceId) -> Result<Option<Ticket>, TicketError> {
        self.check_writable().map_err(TicketError::Database)?;
        let mut state = self.state().map_err(TicketError::Database)?;

        let next = state
            .tickets
            .values_mut()
            .find(|t| t.service_id == service_id && t.status == TicketStatus::Waiting);

        Ok(next.map(|ticket| {
            ticket.status = TicketStatus::Served;
            ticket.clone()
        }))
    }
}
