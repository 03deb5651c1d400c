//! Cancellable scheduled callbacks
//!
//! A [`TimerSet`] schedules messages to be delivered on a channel after a
//! delay. Each scheduled message is a tokio task that sleeps and then sends;
//! the set keeps the task's abort handle so the owner can cancel it.
//!
//! Dropping the set cancels everything still pending, so a view that owns
//! a `TimerSet` cannot receive a timer message after it is torn down.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Identifies one scheduled message within its [`TimerSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A group of pending delayed messages with a single owner
pub struct TimerSet<M> {
    tx: mpsc::UnboundedSender<M>,
    pending: Vec<(TimerId, AbortHandle)>,
    next_id: u64,
}

impl<M: Send + 'static> TimerSet<M> {
    pub fn new(tx: mpsc::UnboundedSender<M>) -> Self {
        Self {
            tx,
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Deliver `msg` after `delay`
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, delay: Duration, msg: impl Into<M>) -> TimerId {
        self.prune();

        let id = TimerId(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        let msg = msg.into();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the UI loop is shutting down
            let _ = tx.send(msg);
        });

        self.pending.push((id, handle.abort_handle()));
        id
    }

    /// Cancel one scheduled message; returns false if it already fired
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(pos) = self.pending.iter().position(|(tid, _)| *tid == id) else {
            return false;
        };
        let (_, handle) = self.pending.swap_remove(pos);
        let was_pending = !handle.is_finished();
        handle.abort();
        was_pending
    }

    /// Cancel every pending message
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain(..) {
            handle.abort();
        }
    }

    /// Number of messages that have not been delivered yet
    pub fn pending(&self) -> usize {
        self.pending
            .iter()
            .filter(|(_, handle)| !handle.is_finished())
            .count()
    }

    fn prune(&mut self) {
        self.pending.retain(|(_, handle)| !handle.is_finished());
    }
}

impl<M> Drop for TimerSet<M> {
    fn drop(&mut self) {
        for (_, handle) in self.pending.drain(..) {
            handle.abort();
        }
    }
}
