//! Queue lifecycle integration tests.
//!
//! These run the use cases against the SQLite store:
//! - Issuing, cancelling and recomputing positions
//! - Independent queues per service
//! - Service deletion and orphaned history
//! - Concurrent issuing through separate connections to one file

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;

use queuedesk_core::{
    QueueError, QueueService, ServiceId, SqliteQueueStore, TicketStatus, TicketStore,
    WaitEstimator,
};

/// Test helper wiring a queue service to one SQLite store.
struct TestHarness {
    queue: QueueService,
    store: Arc<SqliteQueueStore>,
}

impl TestHarness {
    fn in_memory() -> Self {
        let store = Arc::new(SqliteQueueStore::in_memory().expect("Failed to open store"));
        Self::with_store(store)
    }

    fn with_store(store: Arc<SqliteQueueStore>) -> Self {
        let queue = QueueService::new(store.clone(), store.clone(), WaitEstimator::default());
        Self { queue, store }
    }
}

#[test]
fn test_counter_scenario() {
    let h = TestHarness::in_memory();
    let counter = h.queue.create_service("Counter A").unwrap();

    let first = h.queue.create_ticket(counter.id).unwrap();
    assert_eq!((first.queue_position, first.estimated_wait_time), (1, 5.0));
    assert!(first.ticket_number.as_str().starts_with('T'));

    let second = h.queue.create_ticket(counter.id).unwrap();
    assert_eq!((second.queue_position, second.estimated_wait_time), (2, 10.0));

    h.queue.cancel_ticket(first.id).unwrap();

    let view = h.queue.ticket_status(second.id).unwrap();
    assert_eq!((view.queue_position, view.estimated_wait_time), (1, 5.0));
    assert_eq!(view.service_name.as_deref(), Some("Counter A"));

    let status = h.queue.queue_status().unwrap();
    assert_eq!(status.stats.total_tickets, 1);
    assert_eq!(status.stats.avg_wait_time, 5.0);
    assert_eq!(status.tickets[0].ticket_number, second.ticket_number);
}

#[test]
fn test_services_are_independent() {
    let h = TestHarness::in_memory();
    let a = h.queue.create_service("Counter A").unwrap();
    let b = h.queue.create_service("Counter B").unwrap();

    let a1 = h.queue.create_ticket(a.id).unwrap();
    let b1 = h.queue.create_ticket(b.id).unwrap();
    let a2 = h.queue.create_ticket(a.id).unwrap();

    assert_eq!(a1.queue_position, 1);
    assert_eq!(b1.queue_position, 1);
    assert_eq!(a2.queue_position, 2);

    h.queue.serve_next(b.id).unwrap();
    assert_eq!(h.queue.ticket_status(a2.id).unwrap().queue_position, 2);

    let status = h.queue.queue_status().unwrap();
    assert_eq!(status.stats.total_tickets, 2);
    assert_eq!(status.stats.avg_wait_time, 7.5);
}

#[test]
fn test_missing_service_creates_nothing() {
    let h = TestHarness::in_memory();

    let result = h.queue.create_ticket(ServiceId(99));

    assert!(matches!(result, Err(QueueError::NotFound { .. })));
    assert!(h.store.list_waiting(None).unwrap().is_empty());
}

#[test]
fn test_delete_service_lifecycle() {
    let h = TestHarness::in_memory();
    let counter = h.queue.create_service("Counter A").unwrap();
    let ticket = h.queue.create_ticket(counter.id).unwrap();

    assert!(matches!(
        h.queue.delete_service(counter.id),
        Err(QueueError::InvalidState(_))
    ));

    let served = h.queue.serve_next(counter.id).unwrap().unwrap();
    assert_eq!(served.id, ticket.id);
    h.queue.delete_service(counter.id).unwrap();

    assert!(h.queue.list_services().unwrap().is_empty());
    let view = h.queue.ticket_status(ticket.id).unwrap();
    assert_eq!(view.status, TicketStatus::Served);
    assert_eq!(view.service_id, counter.id);
    assert_eq!(view.service_name, None);
    assert_eq!(view.queue_position, 1);

    assert!(matches!(
        h.queue.create_ticket(counter.id),
        Err(QueueError::NotFound { .. })
    ));
}

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("queue.db");

    let (service_id, ticket_id) = {
        let h = TestHarness::with_store(Arc::new(SqliteQueueStore::new(&db_path).unwrap()));
        let counter = h.queue.create_service("Counter A").unwrap();
        h.queue.create_ticket(counter.id).unwrap();
        let ticket = h.queue.create_ticket(counter.id).unwrap();
        (counter.id, ticket.id)
    };

    let h = TestHarness::with_store(Arc::new(SqliteQueueStore::new(&db_path).unwrap()));
    let view = h.queue.ticket_status(ticket_id).unwrap();
    assert_eq!(view.queue_position, 2);

    let next = h.queue.create_ticket(service_id).unwrap();
    assert_eq!(next.queue_position, 3);
}

#[test]
fn test_concurrent_issuing_gets_distinct_positions() {
    const PER_THREAD: usize = 10;
    const THREADS: usize = 4;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("queue.db");

    let setup = TestHarness::with_store(Arc::new(SqliteQueueStore::new(&db_path).unwrap()));
    let counter = setup.queue.create_service("Counter A").unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let db_path = db_path.clone();
            thread::spawn(move || {
                // One connection per thread so the database, not the mutex,
                // serializes the writers.
                let h =
                    TestHarness::with_store(Arc::new(SqliteQueueStore::new(&db_path).unwrap()));
                (0..PER_THREAD)
                    .map(|_| h.queue.create_ticket(counter.id).unwrap().queue_position)
                    .collect::<Vec<u32>>()
            })
        })
        .collect();

    let positions: BTreeSet<u32> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    let expected: BTreeSet<u32> = (1..=(THREADS * PER_THREAD) as u32).collect();
    assert_eq!(positions, expected);
}
