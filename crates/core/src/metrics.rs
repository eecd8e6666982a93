//! Prometheus metrics for queue operations.
//!
//! The server registers these alongside its HTTP metrics; see
//! [`all_metrics`].

use once_cell::sync::Lazy;
use prometheus::core::Collector;
use prometheus::{IntCounter, IntGauge};

/// Tickets issued.
pub static TICKETS_CREATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("queuedesk_tickets_created_total", "Total tickets issued")
        .expect("valid metric definition")
});

/// Tickets cancelled by visitors.
pub static TICKETS_CANCELLED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "queuedesk_tickets_cancelled_total",
        "Total tickets cancelled",
    )
    .expect("valid metric definition")
});

/// Tickets called to a counter.
pub static TICKETS_SERVED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("queuedesk_tickets_served_total", "Total tickets served")
        .expect("valid metric definition")
});

/// Waiting tickets across all services, as of the last queue status read.
pub static TICKETS_WAITING: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "queuedesk_tickets_waiting",
        "Tickets currently waiting across all services",
    )
    .expect("valid metric definition")
});

pub static SERVICES_CREATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("queuedesk_services_created_total", "Total services created")
        .expect("valid metric definition")
});

pub static SERVICES_DELETED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("queuedesk_services_deleted_total", "Total services deleted")
        .expect("valid metric definition")
});

/// All core metrics, boxed for registration.
pub fn all_metrics() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(TICKETS_CREATED.clone()),
        Box::new(TICKETS_CANCELLED.clone()),
        Box::new(TICKETS_SERVED.clone()),
        Box::new(TICKETS_WAITING.clone()),
        Box::new(SERVICES_CREATED.clone()),
        Box::new(SERVICES_DELETED.clone()),
    ]
}
