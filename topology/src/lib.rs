//! Task-side group communication operator topology.
//!
//! This crate gives a task process the pieces it needs to take part in MPI-style
//! collectives (broadcast, reduce, scatter) over a tree of peers: per-peer mailboxes
//! ([`node_channel`]), the blocking collective primitives built on them
//! ([`operator::OperatorTopology`]), the per-group aggregation and type-erased dispatch
//! that sits above them ([`group_client`]), and the task-level name-service handshake
//! that wires a group to its transport ([`client::GroupCommClient`]).
//!
//! Wire transport, serialization of the bytes a [`sender::Sender`] hands off, and the
//! name service's own implementation are all external collaborators supplied by the
//! embedding framework; this crate only defines the traits at those seams.

mod cancel;
mod client;
mod codec;
mod config;
mod error;
mod group_client;
mod message;
mod node_channel;
mod operator;
mod ready_signal;
mod router;
mod sender;

pub use cancel::Cancellation;
pub use client::GroupCommClient;
pub use codec::{Codec, FnCodec, JsonCodec, Reducer};
pub use config::OperatorConfig;
pub use error::{Result, TopologyError};
pub use group_client::{
    Broadcast, CommunicationGroupClient, CommunicationGroupClientBuilder, Reduce, Scatter,
};
pub use message::{FramedMessage, MessageKind};
pub use node_channel::NodeChannel;
pub use operator::{Dispatch, OperatorTopology};
pub use router::MessageRouter;
pub use sender::{Endpoint, NameLookup, NameRegistrar, Sender, TaskId};
