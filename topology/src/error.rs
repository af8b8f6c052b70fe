//! Error kinds surfaced by the topology engine.

use std::collections::BTreeSet;

use crate::sender::TaskId;

/// Errors produced by [`crate::operator::OperatorTopology`] and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// A peer never appeared in the name service before `retry_count` was exhausted.
    #[error("peer {peer} did not resolve through the name service after {attempts} attempts")]
    Initialization {
        /// The peer that never resolved.
        peer: TaskId,
        /// Number of lookup attempts made.
        attempts: usize,
    },

    /// A collective was invoked before `initialize` completed.
    #[error("operator {group}/{operator} used before initialize() completed")]
    NotInitialized {
        /// Group name.
        group: String,
        /// Operator name.
        operator: String,
    },

    /// A collective was invoked after the topology was closed.
    #[error("operator {group}/{operator} used after close()")]
    Closed {
        /// Group name.
        group: String,
        /// Operator name.
        operator: String,
    },

    /// `send_to_parent`/`receive_from_parent` called on the root of the tree.
    #[error("task {0} is the root of this operator and has no parent")]
    NoParent(TaskId),

    /// A message referenced a peer outside this operator's topology.
    #[error("{0} is not a registered peer of this operator")]
    UnknownPeer(TaskId),

    /// An inbound message was null or missing a source.
    #[error("malformed inbound message: {0}")]
    MalformedMessage(String),

    /// A receive observed a payload count incompatible with the operator.
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// A caller-supplied argument was invalid.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// A blocking receive exceeded its deadline.
    #[error("receive timed out after {timeout_ms}ms waiting on {peers:?}")]
    ReceiveTimeout {
        /// The configured timeout that elapsed.
        timeout_ms: u64,
        /// The peers that had not yet produced data.
        peers: BTreeSet<TaskId>,
    },

    /// The surrounding task was cancelled while blocked on a receive.
    #[error("operation cancelled")]
    Cancelled,

    /// The transport reported a send failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The user-supplied codec failed to encode or decode a payload.
    #[error("codec error: {0}")]
    Codec(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TopologyError>;
