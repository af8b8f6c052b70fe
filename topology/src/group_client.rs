//! Aggregates the operators that share a group name, and exposes typed façades over
//! each one's [`OperatorTopology`].

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::codec::{Codec, Reducer};
use crate::config::OperatorConfig;
use crate::error::{Result, TopologyError};
use crate::message::{FramedMessage, MessageKind};
use crate::operator::{Dispatch, OperatorTopology};
use crate::sender::{NameLookup, Sender, TaskId};

/// Type-erased storage for one operator's [`OperatorTopology<T>`].
///
/// The group client doesn't know `T` at the type level — each operator in a group may
/// carry a different element type — so operators are stored behind [`Dispatch`] and
/// recovered by the typed accessors below, which downcast back to the type the caller
/// asked for.
struct ErasedOperator(Box<dyn Dispatch>);

/// Owns every operator in one communication group, keyed by operator name.
///
/// Constructed from the driver's per-operator configuration for this group; every
/// operator is initialized (all peers resolved through the name service) before
/// `CommunicationGroupClient::new` returns.
pub struct CommunicationGroupClient {
    group_name: String,
    operators: HashMap<String, ErasedOperator>,
}

impl CommunicationGroupClient {
    /// Registers and initializes one operator, built with `codec` as its element codec.
    ///
    /// Operators are added one at a time (rather than from a single serialized config
    /// blob) because each carries its own element type `T`; the binding layer that owns
    /// the driver's wire format calls this once per operator after deserializing its
    /// `OperatorConfig`.
    pub fn builder(group_name: impl Into<String>) -> CommunicationGroupClientBuilder {
        CommunicationGroupClientBuilder {
            group_name: group_name.into(),
            operators: HashMap::new(),
        }
    }

    /// The group this client aggregates operators for.
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Returns a broadcast façade for the named operator.
    pub fn broadcast<T: Send + 'static>(&self, name: &str) -> Result<Broadcast<'_, T>> {
        self.topology(name).map(Broadcast)
    }

    /// Returns a reduce façade for the named operator.
    pub fn reduce<T: Send + 'static>(&self, name: &str) -> Result<Reduce<'_, T>> {
        self.topology(name).map(Reduce)
    }

    /// Returns a scatter façade for the named operator.
    pub fn scatter<T: Send + 'static>(&self, name: &str) -> Result<Scatter<'_, T>> {
        self.topology(name).map(Scatter)
    }

    /// Dispatches an inbound message to the named operator. Does not need to know the
    /// operator's element type: the payloads travel as bytes until a typed façade
    /// decodes them.
    pub fn dispatch(&self, operator_name: &str, message: FramedMessage) -> Result<()> {
        let erased = self.operators.get(operator_name).ok_or_else(|| {
            TopologyError::Argument(format!("no operator named '{operator_name}' in group"))
        })?;
        erased.0.dispatch(message)
    }

    fn topology<T: Send + 'static>(&self, name: &str) -> Result<&OperatorTopology<T>> {
        let erased = self.operators.get(name).ok_or_else(|| {
            TopologyError::Argument(format!("no operator named '{name}' in group"))
        })?;
        erased
            .0
            .as_any()
            .downcast_ref::<OperatorTopology<T>>()
            .ok_or_else(|| {
                TopologyError::Argument(format!(
                    "operator '{name}' was registered with a different element type"
                ))
            })
    }
}

/// Builds a [`CommunicationGroupClient`], initializing every added operator in turn.
pub struct CommunicationGroupClientBuilder {
    group_name: String,
    operators: HashMap<String, ErasedOperator>,
}

impl CommunicationGroupClientBuilder {
    /// Constructs an `OperatorTopology<T>` from `config` and initializes it immediately.
    pub fn with_operator<T: Send + 'static>(
        mut self,
        config: &OperatorConfig,
        codec: Arc<dyn Codec<T> + Send + Sync>,
        name_client: Arc<dyn NameLookup>,
        sender: Arc<dyn Sender>,
    ) -> Result<Self> {
        let topology = OperatorTopology::new(config, codec, name_client, sender);
        topology.initialize()?;
        info!(group = %self.group_name, operator = %config.operator_name, "operator ready");
        self.operators.insert(
            config.operator_name.clone(),
            ErasedOperator(Box::new(topology)),
        );
        Ok(self)
    }

    /// Finalizes the group client.
    pub fn build(self) -> CommunicationGroupClient {
        CommunicationGroupClient {
            group_name: self.group_name,
            operators: self.operators,
        }
    }
}

/// A façade exposing only the broadcast-relevant operations of an [`OperatorTopology`].
pub struct Broadcast<'a, T>(&'a OperatorTopology<T>);

impl<T: Send + 'static> Broadcast<'_, T> {
    /// Sends `value` to every child. Only meaningful on an interior or root task.
    pub fn send(&self, value: &T, kind: MessageKind) -> Result<()> {
        self.0.send_to_children(value, kind)
    }
    /// Blocks for the broadcast value from the parent. Only meaningful on a non-root task.
    pub fn receive(&self) -> Result<T> {
        self.0.receive_from_parent()
    }
}

/// A façade exposing only the reduce-relevant operations of an [`OperatorTopology`].
pub struct Reduce<'a, T>(&'a OperatorTopology<T>);

impl<T: Send + 'static> Reduce<'_, T> {
    /// Sends `value` toward the root. Only meaningful on a non-root task.
    pub fn send(&self, value: &T, kind: MessageKind) -> Result<()> {
        self.0.send_to_parent(value, kind)
    }
    /// Collects one value per child and combines them with `reducer`.
    pub fn receive<R: Reducer<T>>(&self, reducer: &R) -> Result<T> {
        self.0.receive_from_children(reducer)
    }
}

/// A façade exposing only the scatter-relevant operations of an [`OperatorTopology`].
pub struct Scatter<'a, T>(&'a OperatorTopology<T>);

impl<T: Send + 'static> Scatter<'_, T> {
    /// Default-chunked scatter across children in declared order.
    pub fn send(&self, messages: &[T], kind: MessageKind) -> Result<()> {
        self.0.scatter_to_children(messages, kind)
    }
    /// Scatter with an explicit chunk size.
    pub fn send_chunked(&self, messages: &[T], chunk_size: usize, kind: MessageKind) -> Result<()> {
        self.0.scatter_to_children_chunked(messages, chunk_size, kind)
    }
    /// Scatter with an explicit child ordering.
    pub fn send_ordered(&self, messages: &[T], order: &[TaskId], kind: MessageKind) -> Result<()> {
        self.0.scatter_to_children_ordered(messages, order, kind)
    }
    /// Blocks for this task's sublist from the parent.
    pub fn receive(&self) -> Result<Vec<T>> {
        self.0.receive_list_from_parent()
    }
}
