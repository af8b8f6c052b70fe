//! The framed message envelope exchanged between operator topologies.
//!
//! The envelope itself is opaque to the core: framing, wire serialization and transport
//! are external collaborators. This module only fixes the shape the router and the
//! `Sender`/`deliver` boundary agree on.

use serde::{Deserialize, Serialize};

use crate::sender::TaskId;

/// Distinguishes user data from internal control traffic.
///
/// The core does not special-case `Control` messages today; the distinction is carried
/// through so that a future control-plane (membership changes, barriers) has a place to
/// live without widening the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// Ordinary collective payload.
    Data,
    /// Internal control traffic.
    Control,
}

/// A fully decoded wire envelope, as handed to [`crate::operator::OperatorTopology::on_message`].
#[derive(Debug, Clone)]
pub struct FramedMessage {
    /// Logical communication group.
    pub group_name: String,
    /// Operator instance within the group.
    pub operator_name: String,
    /// Sender's task identifier.
    pub source: TaskId,
    /// Intended recipient.
    pub destination: TaskId,
    /// Message class.
    pub kind: MessageKind,
    /// One or more opaque payload blobs; most operators carry exactly one, scatter
    /// carries one sublist's worth, encoded element by element.
    pub payloads: Vec<Vec<u8>>,
}
