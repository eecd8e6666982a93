//! SQLite-backed storage for the service catalog and the ticket queue.
//!
//! Both repositories share one connection so that operations spanning the
//! two tables (creating a ticket for a service that must exist, deleting a
//! service nobody waits for) run inside a single transaction.

mod catalog;
mod tickets;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection};

use crate::catalog::ServiceId;
use crate::ticket::{Ticket, TicketId, TicketNumber, TicketStatus};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const TICKET_COLUMNS: &str =
    "id, ticket_number, service_id, status, created_at, estimated_wait_time, queue_position";

/// SQLite implementation of [`ServiceCatalog`](crate::ServiceCatalog) and
/// [`TicketStore`](crate::TicketStore).
pub struct SqliteQueueStore {
    conn: Mutex<Connection>,
}

impl SqliteQueueStore {
    /// Open (or create) the database file and its tables.
    pub fn new(path: &Path) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
        // No foreign key from tickets to services: deleted services leave
        // their historical tickets behind.
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS services (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS tickets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ticket_number TEXT NOT NULL,
                service_id INTEGER NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                estimated_wait_time REAL NOT NULL,
                queue_position INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tickets_service_status ON tickets(service_id, status);
            CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status);
            "#,
        )
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, String> {
        self.conn
            .lock()
            .map_err(|_| "connection mutex poisoned".to_string())
    }
}

fn row_to_ticket(row: &rusqlite::Row) -> rusqlite::Result<Ticket> {
    let status_str: String = row.get(3)?;
    let status: TicketStatus = status_str
        .parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into()))?;

    let created_at_str: String = row.get(4)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Ticket {
        id: TicketId(row.get(0)?),
        ticket_number: TicketNumber::from(row.get::<_, String>(1)?),
        service_id: ServiceId(row.get(2)?),
        status,
        created_at,
        estimated_wait_time: row.get(5)?,
        queue_position: row.get(6)?,
    })
}

fn service_exists(conn: &Connection, id: ServiceId) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM services WHERE id = ?)",
        params![id.0],
        |row| row.get(0),
    )
}

fn count_waiting(
    conn: &Connection,
    service_id: ServiceId,
    up_to: Option<TicketId>,
) -> rusqlite::Result<u32> {
    match up_to {
        Some(ticket_id) => conn.query_row(
            "SELECT COUNT(*) FROM tickets WHERE service_id = ? AND status = 'waiting' AND id <= ?",
            params![service_id.0, ticket_id.0],
            |row| row.get(0),
        ),
        None => conn.query_row(
            "SELECT COUNT(*) FROM tickets WHERE service_id = ? AND status = 'waiting'",
            params![service_id.0],
            |row| row.get(0),
        ),
    }
}
