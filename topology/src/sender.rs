//! The outbound boundary: the transport-facing `Sender`, and the name-service lookup
//! used only during `initialize`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::message::MessageKind;

/// Identifier of a task within the surrounding job-execution framework.
///
/// Opaque from the topology's point of view: it is whatever the driver handed out when
/// it built the communication group, and is never parsed or interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl TaskId {
    /// Borrows the underlying identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_owned())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId(s)
    }
}

/// The network endpoint a name-service lookup resolves a [`TaskId`] to.
///
/// Opaque to the topology: it is handed back to the transport, never inspected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(pub String);

/// External directory mapping a task identifier to a network endpoint.
///
/// Queried only by [`crate::operator::OperatorTopology::initialize`]; the core never
/// calls `lookup` once a collective is underway.
pub trait NameLookup: Send + Sync {
    /// Resolves `task`, returning `None` if it has not yet registered.
    fn lookup(&self, task: &TaskId) -> Option<Endpoint>;
}

/// The registration side of the name service: used once by
/// [`crate::client::GroupCommClient`] at task startup and shutdown, never by the
/// per-operator collectives.
pub trait NameRegistrar: NameLookup {
    /// Publishes this task's endpoint so peers' `lookup` calls can find it.
    fn register(&self, task: &TaskId, endpoint: Endpoint) -> Result<(), crate::error::TopologyError>;
    /// Removes this task's registration.
    fn unregister(&self, task: &TaskId) -> Result<(), crate::error::TopologyError>;
}

/// Synchronous, fire-and-forget outbound path.
///
/// A single `Sender` is shared by every operator topology in a task; implementations
/// must be safe for concurrent `send` calls issued by different collective primitives.
pub trait Sender: Send + Sync {
    /// Hands a framed message to the transport, addressed to `destination`.
    ///
    /// Fails if `destination` cannot be resolved or the transport reports a permanent
    /// error. Never blocks waiting for the peer to consume the message.
    fn send(
        &self,
        group_name: &str,
        operator_name: &str,
        source: &TaskId,
        destination: &TaskId,
        payloads: Vec<Vec<u8>>,
        kind: MessageKind,
    ) -> Result<(), crate::error::TopologyError>;
}
