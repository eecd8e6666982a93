//! Queue position calculator.

use crate::ticket::QueueSlot;

/// Default minutes a visitor waits per queued position.
pub const DEFAULT_MINUTES_PER_POSITION: f64 = 5.0;

/// Maps a rank in a service queue to a position and estimated wait.
///
/// The model is linear: every position up to and including the visitor's own
/// costs `minutes_per_position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitEstimator {
    minutes_per_position: f64,
}

impl WaitEstimator {
    pub fn new(minutes_per_position: f64) -> Self {
        Self {
            minutes_per_position,
        }
    }

    pub fn minutes_per_position(&self) -> f64 {
        self.minutes_per_position
    }

    /// Slot for a ticket joining behind `waiting_ahead` waiting tickets.
    pub fn slot_after(&self, waiting_ahead: u32) -> QueueSlot {
        self.slot_at(waiting_ahead.saturating_add(1))
    }

    /// Slot for a known 1-based position.
    pub fn slot_at(&self, position: u32) -> QueueSlot {
        QueueSlot {
            position,
            estimated_wait_time: f64::from(position) * self.minutes_per_position,
        }
    }
}

impl Default for WaitEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES_PER_POSITION)
    }
}
