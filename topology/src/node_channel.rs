//! Per-peer inbound mailbox.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::Instant;

use crate::cancel::{Cancellation, POLL_QUANTUM_MS};
use crate::sender::TaskId;

/// Why a blocking wait on a [`NodeChannel`] or the ready-signal returned without data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WaitOutcome {
    /// The deadline passed before anything arrived.
    TimedOut,
    /// The surrounding topology was torn down.
    Cancelled,
}

/// A concurrent FIFO mailbox dedicated to messages arriving from one peer.
///
/// Strict FIFO: concurrent `add`/`take` are linearizable with respect to each other on a
/// single channel. Multiple concurrent takers on one channel are not supported — each
/// channel has at most one logical receiver, enforced by the collective algorithms built
/// on top, not by this type.
pub struct NodeChannel {
    peer_id: TaskId,
    queue: Mutex<VecDeque<Vec<Vec<u8>>>>,
    cvar: Condvar,
}

impl NodeChannel {
    /// Creates an empty mailbox for `peer_id`.
    pub fn new(peer_id: TaskId) -> Self {
        NodeChannel {
            peer_id,
            queue: Mutex::new(VecDeque::new()),
            cvar: Condvar::new(),
        }
    }

    /// The peer this mailbox is dedicated to.
    pub fn peer_id(&self) -> &TaskId {
        &self.peer_id
    }

    /// Appends `payloads` to the queue. Never blocks; wakes any waiter.
    pub fn add(&self, payloads: Vec<Vec<u8>>) {
        let mut queue = self.queue.lock().expect("NodeChannel mutex poisoned");
        queue.push_back(payloads);
        self.cvar.notify_all();
    }

    /// Non-blocking peek: true iff the queue is currently non-empty.
    pub fn has_message(&self) -> bool {
        !self.queue.lock().expect("NodeChannel mutex poisoned").is_empty()
    }

    /// Removes and returns the oldest queued payload list, blocking until one is
    /// available, `deadline` passes, or `cancel` fires.
    ///
    /// There is no timeout intrinsic to the channel itself — `deadline` is always
    /// supplied by the caller, which is the layer that knows `timeout_ms`.
    pub(crate) fn take(
        &self,
        deadline: Instant,
        cancel: &Cancellation,
    ) -> Result<Vec<Vec<u8>>, WaitOutcome> {
        let mut queue = self.queue.lock().expect("NodeChannel mutex poisoned");
        loop {
            if let Some(payloads) = queue.pop_front() {
                return Ok(payloads);
            }
            if cancel.is_cancelled() {
                return Err(WaitOutcome::Cancelled);
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(WaitOutcome::TimedOut);
            }
            let remaining = deadline - now;
            let quantum = remaining.min(std::time::Duration::from_millis(POLL_QUANTUM_MS));
            let (guard, _timeout) = self
                .cvar
                .wait_timeout(queue, quantum)
                .expect("NodeChannel mutex poisoned");
            queue = guard;
        }
    }
}
