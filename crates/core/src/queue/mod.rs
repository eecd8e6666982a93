//! Queue use cases: issuing, cancelling and tracking tickets, the
//! cross-service status view and catalog administration.
//!
//! Positions are never kept in memory. A ticket's position is its rank among
//! the waiting tickets of its service and is recomputed from the store on
//! every read, then written back so the stored row reflects the last read.

mod admin;
mod error;
mod estimator;
mod lifecycle;
mod status;
mod views;

pub use error::QueueError;
pub use estimator::{WaitEstimator, DEFAULT_MINUTES_PER_POSITION};
pub use lifecycle::QueueService;
pub use views::{QueueEntry, QueueStats, QueueStatus, TicketView};
