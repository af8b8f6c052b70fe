//! Cooperative cancellation shared by every blocking wait in one topology.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The slice a blocking wait sleeps for between checks of the cancellation flag and the
/// overall deadline. Small enough that cancellation and timeout both feel immediate,
/// large enough not to spin.
pub(crate) const POLL_QUANTUM_MS: u64 = 100;

/// A cancellation flag shared between an [`crate::operator::OperatorTopology`] and every
/// [`crate::node_channel::NodeChannel`]/ready-signal wait it owns.
///
/// Cloning shares the same underlying flag; `cancel()` from any clone is observed by
/// every blocked waiter within one polling quantum.
#[derive(Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    /// Builds a fresh, not-yet-cancelled token.
    pub fn new() -> Self {
        Cancellation(Arc::new(AtomicBool::new(false)))
    }

    /// Marks the token cancelled; all waiters observe this within one polling quantum.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once `cancel` has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
