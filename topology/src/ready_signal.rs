//! The wait-set edge trigger used by `receive_from_children` to wait on "any child has
//! new data" without per-child polling.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::cancel::{Cancellation, POLL_QUANTUM_MS};
use crate::node_channel::WaitOutcome;
use crate::sender::TaskId;

/// A queue of "this peer may have new data" signals.
///
/// Every genuine arrival calls the corresponding [`crate::node_channel::NodeChannel::add`]
/// and pushes a signal here under the *same* coordination lock
/// (see [`crate::operator::OperatorTopology::on_message`]), so a signal observed here is
/// never stale relative to the channel it names — except for signals a previous wait
/// cycle has already acted on, which `drain_stale` exists to discard.
pub(crate) struct ReadySignal {
    queue: Mutex<VecDeque<TaskId>>,
    cvar: Condvar,
}

impl ReadySignal {
    pub(crate) fn new() -> Self {
        ReadySignal {
            queue: Mutex::new(VecDeque::new()),
            cvar: Condvar::new(),
        }
    }

    /// Enqueues `peer` and wakes any blocked waiter. Intended to be called while the
    /// caller already holds the coordination lock (see `on_message`); safe either way.
    pub(crate) fn push(&self, peer: TaskId) {
        let mut queue = self.queue.lock().expect("ready-signal mutex poisoned");
        queue.push_back(peer);
        self.cvar.notify_all();
    }

    /// Discards every entry currently queued, without blocking.
    ///
    /// Called immediately before a fresh wait cycle begins, so that signals a prior
    /// cycle already consumed don't cause a spurious immediate return.
    pub(crate) fn drain_stale(&self) {
        self.queue.lock().expect("ready-signal mutex poisoned").clear();
    }

    /// Removes and returns the oldest queued peer, blocking until one is available,
    /// `deadline` passes, or `cancel` fires.
    pub(crate) fn take(
        &self,
        deadline: Instant,
        cancel: &Cancellation,
    ) -> Result<TaskId, WaitOutcome> {
        let mut queue = self.queue.lock().expect("ready-signal mutex poisoned");
        loop {
            if let Some(peer) = queue.pop_front() {
                return Ok(peer);
            }
            if cancel.is_cancelled() {
                return Err(WaitOutcome::Cancelled);
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(WaitOutcome::TimedOut);
            }
            let remaining = deadline - now;
            let quantum = remaining.min(Duration::from_millis(POLL_QUANTUM_MS));
            let (guard, _timeout) = self
                .cvar
                .wait_timeout(queue, quantum)
                .expect("ready-signal mutex poisoned");
            queue = guard;
        }
    }
}
