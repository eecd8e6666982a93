//! Testing utilities: an in-memory store that stands in for SQLite.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use queuedesk_core::{testing::InMemoryQueueStore, QueueService, WaitEstimator};
//!
//! let store = Arc::new(InMemoryQueueStore::new());
//! let queue = QueueService::new(store.clone(), store.clone(), WaitEstimator::default());
//!
//! // Simulate a failing database for the next writes
//! store.set_fail_writes(true);
//! ```

mod memory_store;

pub use memory_store::InMemoryQueueStore;
