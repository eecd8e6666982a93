use rusqlite::{params, OptionalExtension, TransactionBehavior};

use super::{count_waiting, row_to_ticket, service_exists, SqliteQueueStore, TICKET_COLUMNS};
use crate::catalog::ServiceId;
use crate::ticket::{
    NewTicket, QueueSlot, Ticket, TicketError, TicketId, TicketStatus, TicketStore,
};

fn db_err(e: rusqlite::Error) -> TicketError {
    TicketError::Database(e.to_string())
}

impl TicketStore for SqliteQueueStore {
    fn create_ticket(
        &self,
        ticket: NewTicket,
        assign: &dyn Fn(u32) -> QueueSlot,
    ) -> Result<Ticket, TicketError> {
        let mut conn = self.conn().map_err(TicketError::Database)?;

        // IMMEDIATE takes the write lock up front, so the count below cannot
        // be observed by another writer before our insert commits.
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(db_err)?;

        if !service_exists(&tx, ticket.service_id).map_err(db_err)? {
            return Err(TicketError::ServiceNotFound(ticket.service_id));
        }

        let waiting = count_waiting(&tx, ticket.service_id, None).map_err(db_err)?;
        let slot = assign(waiting);
        let status = TicketStatus::Waiting;

        tx.execute(
            "INSERT INTO tickets (ticket_number, service_id, status, created_at, estimated_wait_time, queue_position) VALUES (?, ?, ?, ?, ?, ?)",
            params![
                ticket.ticket_number.as_str(),
                ticket.service_id.0,
                status.as_str(),
                ticket.created_at.to_rfc3339(),
                slot.estimated_wait_time,
                slot.position,
            ],
        )
        .map_err(db_err)?;

        let id = TicketId(tx.last_insert_rowid());
        tx.commit().map_err(db_err)?;

        Ok(Ticket {
            id,
            ticket_number: ticket.ticket_number,
            service_id: ticket.service_id,
            status,
            created_at: ticket.created_at,
            estimated_wait_time: slot.estimated_wait_time,
            queue_position: slot.position,
        })
    }

    fn get_ticket(&self, id: TicketId) -> Result<Option<Ticket>, TicketError> {
        let conn = self.conn().map_err(TicketError::Database)?;

        let result = conn.query_row(
            &format!("SELECT {} FROM tickets WHERE id = ?", TICKET_COLUMNS),
            params![id.0],
            row_to_ticket,
        );

        match result {
            Ok(ticket) => Ok(Some(ticket)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(db_err(e)),
        }
    }

    fn waiting_count(
        &self,
        service_id: ServiceId,
        up_to: Option<TicketId>,
    ) -> Result<u32, TicketError> {
        let conn = self.conn().map_err(TicketError::Database)?;
        count_waiting(&conn, service_id, up_to).map_err(db_err)
    }

    fn cancel_ticket(&self, id: TicketId) -> Result<Ticket, TicketError> {
        let mut conn = self.conn().map_err(TicketError::Database)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(db_err)?;

        let current = match tx.query_row(
            &format!("SELECT {} FROM tickets WHERE id = ?", TICKET_COLUMNS),
            params![id.0],
            row_to_ticket,
        ) {
            Ok(ticket) => ticket,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Err(TicketError::NotFound(id)),
            Err(e) => return Err(db_err(e)),
        };

        if !current.status.can_cancel() {
            return Err(TicketError::InvalidState {
                ticket_id: id,
                current: current.status,
                operation: "cancel",
            });
        }

        tx.execute(
            "UPDATE tickets SET status = ? WHERE id = ?",
            params![TicketStatus::Cancelled.as_str(), id.0],
        )
        .map_err(db_err)?;
        tx.commit().map_err(db_err)?;

        Ok(Ticket {
            status: TicketStatus::Cancelled,
            ..current
        })
    }

    fn update_wait_and_position(&self, id: TicketId, slot: QueueSlot) -> Result<(), TicketError> {
        let conn = self.conn().map_err(TicketError::Database)?;

        let updated = conn
            .execute(
                "UPDATE tickets SET estimated_wait_time = ?, queue_position = ? WHERE id = ?",
                params![slot.estimated_wait_time, slot.position, id.0],
            )
            .map_err(db_err)?;

        if updated == 0 {
            return Err(TicketError::NotFound(id));
        }

        Ok(())
    }

    fn list_waiting(&self, service_id: Option<ServiceId>) -> Result<Vec<Ticket>, TicketError> {
        let conn = self.conn().map_err(TicketError::Database)?;

        let (sql, params): (String, Vec<i64>) = match service_id {
            Some(service_id) => (
                format!(
                    "SELECT {} FROM tickets WHERE status = 'waiting' AND service_id = ? ORDER BY id ASC",
                    TICKET_COLUMNS
                ),
                vec![service_id.0],
            ),
            None => (
                format!(
                    "SELECT {} FROM tickets WHERE status = 'waiting' ORDER BY id ASC",
                    TICKET_COLUMNS
                ),
                Vec::new(),
            ),
        };

        let mut stmt = conn.prepare(&sql).map_err(db_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params), row_to_ticket)
            .map_err(db_err)?;

        let mut tickets = Vec::new();
        for row_result in rows {
            tickets.push(row_result.map_err(db_err)?);
        }

        Ok(tickets)
    }

    fn serve_next(&self, service_id: ServiceId) -> Result<Option<Ticket>, TicketError> {
        let mut conn = self.conn().map_err(TicketError::Database)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(db_err)?;

        let next = tx
            .query_row(
                &format!(
                    "SELECT {} FROM tickets WHERE service_id = ? AND status = 'waiting' ORDER BY id ASC LIMIT 1",
                    TICKET_COLUMNS
                ),
                params![service_id.0],
                row_to_ticket,
            )
            .optional()
            .map_err(db_err)?;

        let Some(ticket) = next else {
            return Ok(None);
        };

        tx.execute(
            "UPDATE tickets SET status = ? WHERE id = ?",
            params![TicketStatus::Served.as_str(), ticket.id.0],
        )
        .map_err(db_err)?;
        tx.commit().map_err(db_err)?;

        Ok(Some(Ticket {
            status: TicketStatus::Served,
            ..ticket
        }))
    }
}
