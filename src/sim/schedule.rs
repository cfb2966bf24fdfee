//! Delayed events measured in wall-clock time
//!
//! The simulation owns its own clock (seconds of real time fed into `tick`),
//! so "in three seconds" is an entry in this queue rather than a timer thread.
//! The queue is drained at the start of each tick by the same loop that owns
//! the state it mutates.

use serde::{Deserialize, Serialize};

/// Something that happens later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scheduled {
    /// Bring the player back. Only valid while `epoch` is still current.
    Respawn { epoch: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayedEvent {
    /// Clock time (seconds) at which the event fires
    pub due: f64,
    pub event: Scheduled,
}

/// Pending delayed events, kept sorted by due time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventQueue {
    pending: Vec<DelayedEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire `delay` seconds after `now`
    pub fn schedule(&mut self, now: f64, delay: f64, event: Scheduled) {
        let due = now + delay.max(0.0);
        // Insert after any equal due times so same-time events keep FIFO order
        let idx = self.pending.partition_point(|e| e.due <= due);
        self.pending.insert(idx, DelayedEvent { due, event });
    }

    /// Remove and return every event due at or before `now`, earliest first
    pub fn drain_due(&mut self, now: f64) -> Vec<Scheduled> {
        let n = self.pending.partition_point(|e| e.due <= now);
        self.pending.drain(..n).map(|e| e.event).collect()
    }

    /// Drop everything pending
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the next event, if any
    pub fn next_due(&self) -> Option<f64> {
        self.pending.first().map(|e| e.due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_fires_once_when_due() {
        let mut q = EventQueue::new();
        q.schedule(1.0, 3.0, Scheduled::Respawn { epoch: 0 });

        assert!(q.drain_due(3.99).is_empty());
        assert_eq!(q.drain_due(4.0), vec![Scheduled::Respawn { epoch: 0 }]);
        assert!(q.drain_due(100.0).is_empty());
        assert!(q.is_empty());
    }

    #[test]
    fn test_drain_in_due_order() {
        let mut q = EventQueue::new();
        q.schedule(0.0, 5.0, Scheduled::Respawn { epoch: 2 });
        q.schedule(0.0, 1.0, Scheduled::Respawn { epoch: 1 });
        q.schedule(0.0, 5.0, Scheduled::Respawn { epoch: 3 });
        assert_eq!(q.next_due(), Some(1.0));

        let fired = q.drain_due(10.0);
        assert_eq!(
            fired,
            vec![
                Scheduled::Respawn { epoch: 1 },
                Scheduled::Respawn { epoch: 2 },
                Scheduled::Respawn { epoch: 3 },
            ]
        );
    }

    #[test]
    fn test_cancel_all() {
        let mut q = EventQueue::new();
        q.schedule(0.0, 1.0, Scheduled::Respawn { epoch: 0 });
        q.cancel_all();
        assert!(q.drain_due(10.0).is_empty());
        assert_eq!(q.next_due(), None);
    }
}
