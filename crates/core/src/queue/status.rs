use std::collections::HashMap;

use tracing::debug;

use super::{QueueEntry, QueueError, QueueService, QueueStats, QueueStatus};
use crate::catalog::ServiceId;
use crate::metrics::TICKETS_WAITING;

impl QueueService {
    /// Snapshot of every waiting ticket across all services.
    ///
    /// Each ticket's slot is recomputed from its rank within its service and
    /// written back when it moved.
    pub fn queue_status(&self) -> Result<QueueStatus, QueueError> {
        let waiting = self.tickets.list_waiting(None)?;
        let names: HashMap<ServiceId, String> = self
            .catalog
            .list_services()?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let mut ranks: HashMap<ServiceId, u32> = HashMap::new();
        let mut entries = Vec::with_capacity(waiting.len());

        for ticket in waiting {
            let rank = ranks.entry(ticket.service_id).or_insert(0);
            *rank += 1;
            let slot = self.estimator.slot_at(*rank);

            if slot != ticket.slot() {
                debug!(
                    ticket_id = %ticket.id,
                    from = ticket.queue_position,
                    to = slot.position,
                    "Queue position moved"
                );
                self.tickets.update_wait_and_position(ticket.id, slot)?;
            }

            entries.push(QueueEntry {
                service_name: names.get(&ticket.service_id).cloned(),
                ticket_number: ticket.ticket_number,
                status: ticket.status,
                estimated_wait_time: slot.estimated_wait_time,
            });
        }

        let stats = summarize(&entries);
        TICKETS_WAITING.set(i64::try_from(stats.total_tickets).unwrap_or(i64::MAX));

        Ok(QueueStatus {
            tickets: entries,
            stats,
        })
    }
}

fn summarize(entries: &[QueueEntry]) -> QueueStats {
    let total_tickets = entries.len();
    let avg_wait_time = if total_tickets == 0 {
        0.0
    } else {
        let sum: f64 = entries.iter().map(|e| e.estimated_wait_time).sum();
        round2(sum / total_tickets as f64)
    };

    QueueStats {
        total_tickets,
        avg_wait_time,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
