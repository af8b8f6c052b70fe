//! The core: a per-operator view of (optional parent, ordered children), and the
//! send/receive/scatter/reduce primitives built over [`NodeChannel`]s.

use std::any::Any;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::cancel::Cancellation;
use crate::codec::{Codec, Reducer};
use crate::config::{OperatorConfig, RETRY_BACKOFF_MS};
use crate::error::{Result, TopologyError};
use crate::message::{FramedMessage, MessageKind};
use crate::node_channel::{NodeChannel, WaitOutcome};
use crate::ready_signal::ReadySignal;
use crate::sender::{NameLookup, Sender, TaskId};

/// Lifecycle states of an [`OperatorTopology`]. Transitions are linear:
/// `Uninitialized -> Initialized -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    Initialized,
    Closed,
}

/// Per-operator topology: one optional parent, an ordered list of children, and the
/// blocking collectives built over their [`NodeChannel`]s.
///
/// All collective operations are forbidden before [`OperatorTopology::initialize`]
/// returns (`NotInitializedError`) and after [`OperatorTopology::close`]
/// (`ClosedError`).
pub struct OperatorTopology<T> {
    self_id: TaskId,
    group_name: String,
    operator_name: String,
    parent: Option<Arc<NodeChannel>>,
    children: Vec<Arc<NodeChannel>>,
    id_to_channel: HashMap<TaskId, Arc<NodeChannel>>,
    ready_signal: ReadySignal,
    /// Guards the pairing of a channel's `add` with the matching `ready_signal` push,
    /// and the "scan, then drain" step of `wait_for_any`, against each other. Never
    /// held across a blocking wait.
    coordination: Mutex<()>,
    state: Mutex<State>,
    cancel: Cancellation,
    codec: Arc<dyn Codec<T> + Send + Sync>,
    timeout_ms: u64,
    retry_count: usize,
    name_client: Arc<dyn NameLookup>,
    sender: Arc<dyn Sender>,
}

impl<T: Send + 'static> OperatorTopology<T> {
    /// Builds a topology from driver configuration. Does not contact the name service;
    /// call [`OperatorTopology::initialize`] before any send or receive.
    pub fn new(
        config: &OperatorConfig,
        codec: Arc<dyn Codec<T> + Send + Sync>,
        name_client: Arc<dyn NameLookup>,
        sender: Arc<dyn Sender>,
    ) -> Self {
        let parent = if config.is_root() {
            None
        } else {
            Some(Arc::new(NodeChannel::new(config.topology_root_task_id.clone())))
        };
        let children: Vec<Arc<NodeChannel>> = config
            .topology_child_task_ids
            .iter()
            .map(|id| Arc::new(NodeChannel::new(id.clone())))
            .collect();

        let mut id_to_channel = HashMap::with_capacity(children.len() + 1);
        if let Some(parent) = &parent {
            id_to_channel.insert(parent.peer_id().clone(), parent.clone());
        }
        for child in &children {
            id_to_channel.insert(child.peer_id().clone(), child.clone());
        }

        OperatorTopology {
            self_id: config.self_task_id.clone(),
            group_name: config.group_name.clone(),
            operator_name: config.operator_name.clone(),
            parent,
            children,
            id_to_channel,
            ready_signal: ReadySignal::new(),
            coordination: Mutex::new(()),
            state: Mutex::new(State::Uninitialized),
            cancel: Cancellation::new(),
            codec,
            timeout_ms: config.timeout_ms,
            retry_count: config.retry_count.max(1),
            name_client,
            sender,
        }
    }

    /// True iff this task has at least one child, i.e. it is an interior or root node.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The set of peers this operator knows about (parent, if any, plus children).
    fn peers(&self) -> impl Iterator<Item = &Arc<NodeChannel>> {
        self.parent.iter().chain(self.children.iter())
    }

    /// Resolves every peer through the name service before any send or receive may
    /// occur. Retries each peer up to `retry_count` times with a fixed 500ms backoff;
    /// the first lookup failure after the budget is exhausted is fatal for the operator.
    pub fn initialize(&self) -> Result<()> {
        {
            let state = self.state.lock().expect("state mutex poisoned");
            if *state == State::Initialized {
                return Ok(());
            }
            if *state == State::Closed {
                return Err(TopologyError::Closed {
                    group: self.group_name.clone(),
                    operator: self.operator_name.clone(),
                });
            }
        }

        for channel in self.peers() {
            let peer = channel.peer_id();
            let mut resolved = false;
            for attempt in 1..=self.retry_count {
                if self.name_client.lookup(peer).is_some() {
                    resolved = true;
                    break;
                }
                debug!(
                    group = %self.group_name, operator = %self.operator_name,
                    %peer, attempt, "peer not yet registered with the name service"
                );
                if attempt < self.retry_count {
                    std::thread::sleep(Duration::from_millis(RETRY_BACKOFF_MS));
                }
            }
            if !resolved {
                warn!(
                    group = %self.group_name, operator = %self.operator_name, %peer,
                    attempts = self.retry_count, "peer never resolved, aborting initialize"
                );
                return Err(TopologyError::Initialization {
                    peer: peer.clone(),
                    attempts: self.retry_count,
                });
            }
        }

        *self.state.lock().expect("state mutex poisoned") = State::Initialized;
        info!(group = %self.group_name, operator = %self.operator_name, "operator initialized");
        Ok(())
    }

    /// Tears the operator down. Draining pending messages is not required; this only
    /// flips the state and wakes anything blocked in a receive with `CancelledError`.
    pub fn close(&self) {
        *self.state.lock().expect("state mutex poisoned") = State::Closed;
        self.cancel.cancel();
    }

    fn ensure_active(&self) -> Result<()> {
        match *self.state.lock().expect("state mutex poisoned") {
            State::Uninitialized => Err(TopologyError::NotInitialized {
                group: self.group_name.clone(),
                operator: self.operator_name.clone(),
            }),
            State::Initialized => Ok(()),
            State::Closed => Err(TopologyError::Closed {
                group: self.group_name.clone(),
                operator: self.operator_name.clone(),
            }),
        }
    }

    fn deadline(&self) -> Instant {
        Instant::now() + Duration::from_millis(self.timeout_ms)
    }

    fn wait_outcome(&self, outcome: WaitOutcome, pending: &BTreeSet<TaskId>) -> TopologyError {
        match outcome {
            WaitOutcome::TimedOut => TopologyError::ReceiveTimeout {
                timeout_ms: self.timeout_ms,
                peers: pending.clone(),
            },
            WaitOutcome::Cancelled => TopologyError::Cancelled,
        }
    }

    /// Inbound dispatch hook. Appends `message.payloads` to the source's mailbox and
    /// enqueues a ready-signal, atomically with respect to `wait_for_any`'s scan.
    pub fn on_message(&self, message: FramedMessage) -> Result<()> {
        self.ensure_active()?;
        if message.source.as_str().is_empty() {
            return Err(TopologyError::MalformedMessage(
                "message has no source task id".into(),
            ));
        }
        let channel = self
            .id_to_channel
            .get(&message.source)
            .ok_or_else(|| TopologyError::UnknownPeer(message.source.clone()))?;

        let _guard = self.coordination.lock().expect("coordination mutex poisoned");
        channel.add(message.payloads);
        self.ready_signal.push(message.source);
        Ok(())
    }

    /// Sends `value` to the parent. Fails with `NoParentError` on the root.
    pub fn send_to_parent(&self, value: &T, kind: MessageKind) -> Result<()> {
        self.ensure_active()?;
        let parent = self
            .parent
            .as_ref()
            .ok_or_else(|| TopologyError::NoParent(self.self_id.clone()))?;
        let encoded = self.codec.encode(value)?;
        self.sender.send(
            &self.group_name,
            &self.operator_name,
            &self.self_id,
            parent.peer_id(),
            vec![encoded],
            kind,
        )
    }

    /// Encodes `value` once and sends one copy to each child, in declared order.
    pub fn send_to_children(&self, value: &T, kind: MessageKind) -> Result<()> {
        self.ensure_active()?;
        let encoded = self.codec.encode(value)?;
        for child in &self.children {
            self.sender.send(
                &self.group_name,
                &self.operator_name,
                &self.self_id,
                child.peer_id(),
                vec![encoded.clone()],
                kind,
            )?;
        }
        Ok(())
    }

    /// Partitions `messages` into `ceil(N / |children|)`-sized sublists, one per child,
    /// in declared order. A short final sublist is sent as-is; if it would be empty for
    /// a child, that child receives nothing this call.
    pub fn scatter_to_children(&self, messages: &[T], kind: MessageKind) -> Result<()> {
        let order = self.children_order();
        let chunk_size = default_chunk_size(messages.len(), order.len());
        self.scatter_with(messages, chunk_size, &order, kind)
    }

    /// As [`OperatorTopology::scatter_to_children`], with an explicit chunk size.
    pub fn scatter_to_children_chunked(
        &self,
        messages: &[T],
        chunk_size: usize,
        kind: MessageKind,
    ) -> Result<()> {
        if chunk_size == 0 {
            return Err(TopologyError::Argument("chunk_size must be positive".into()));
        }
        let order = self.children_order();
        self.scatter_with(messages, chunk_size, &order, kind)
    }

    /// As [`OperatorTopology::scatter_to_children`], with an explicit child ordering.
    pub fn scatter_to_children_ordered(
        &self,
        messages: &[T],
        order: &[TaskId],
        kind: MessageKind,
    ) -> Result<()> {
        if order.len() != self.children.len() {
            return Err(TopologyError::Argument(format!(
                "order has {} entries, but this operator has {} children",
                order.len(),
                self.children.len()
            )));
        }
        for id in order {
            if !self.id_to_channel.contains_key(id) {
                return Err(TopologyError::UnknownPeer(id.clone()));
            }
        }
        let chunk_size = default_chunk_size(messages.len(), order.len());
        self.scatter_with(messages, chunk_size, order, kind)
    }

    fn children_order(&self) -> Vec<TaskId> {
        self.children.iter().map(|c| c.peer_id().clone()).collect()
    }

    fn scatter_with(
        &self,
        messages: &[T],
        chunk_size: usize,
        order: &[TaskId],
        kind: MessageKind,
    ) -> Result<()> {
        self.ensure_active()?;
        if chunk_size == 0 {
            return Err(TopologyError::Argument("chunk_size must be positive".into()));
        }
        let total = messages.len();
        for (index, child_id) in order.iter().enumerate() {
            let start = index * chunk_size;
            if start >= total {
                continue;
            }
            let end = (start + chunk_size).min(total);
            let encoded = messages[start..end]
                .iter()
                .map(|m| self.codec.encode(m))
                .collect::<Result<Vec<_>>>()?;
            let channel = &self.id_to_channel[child_id];
            self.sender.send(
                &self.group_name,
                &self.operator_name,
                &self.self_id,
                channel.peer_id(),
                encoded,
                kind,
            )?;
        }
        Ok(())
    }

    /// Blocks on the parent's mailbox and decodes exactly one payload.
    pub fn receive_from_parent(&self) -> Result<T> {
        self.ensure_active()?;
        let parent = self
            .parent
            .as_ref()
            .ok_or_else(|| TopologyError::NoParent(self.self_id.clone()))?;
        let pending: BTreeSet<TaskId> = std::iter::once(parent.peer_id().clone()).collect();
        let payloads = parent
            .take(self.deadline(), &self.cancel)
            .map_err(|e| self.wait_outcome(e, &pending))?;
        if payloads.len() != 1 {
            return Err(TopologyError::Protocol(format!(
                "expected exactly one payload from parent, got {}",
                payloads.len()
            )));
        }
        self.codec.decode(&payloads[0])
    }

    /// Blocks on the parent's mailbox and decodes one or more payloads.
    pub fn receive_list_from_parent(&self) -> Result<Vec<T>> {
        self.ensure_active()?;
        let parent = self
            .parent
            .as_ref()
            .ok_or_else(|| TopologyError::NoParent(self.self_id.clone()))?;
        let pending: BTreeSet<TaskId> = std::iter::once(parent.peer_id().clone()).collect();
        let payloads = parent
            .take(self.deadline(), &self.cancel)
            .map_err(|e| self.wait_outcome(e, &pending))?;
        if payloads.is_empty() {
            return Err(TopologyError::Protocol(
                "expected at least one payload from parent, got zero".into(),
            ));
        }
        payloads.iter().map(|p| self.codec.decode(p)).collect()
    }

    /// Collects one payload from each child, in arrival order, and reduces them.
    ///
    /// Reducer ordering is arrival order, not declared order: if `reducer` is not
    /// commutative, results are not deterministic across runs. This is by design, as it
    /// is for MPI-style reducers generally.
    pub fn receive_from_children<R: Reducer<T>>(&self, reducer: &R) -> Result<T> {
        self.ensure_active()?;
        let deadline = self.deadline();
        let mut pending: BTreeSet<TaskId> =
            self.children.iter().map(|c| c.peer_id().clone()).collect();
        let mut received = Vec::with_capacity(self.children.len());

        while !pending.is_empty() {
            let ready = self.wait_for_any(&pending, deadline)?;
            for peer in ready {
                let channel = &self.id_to_channel[&peer];
                let payloads = channel
                    .take(deadline, &self.cancel)
                    .map_err(|e| self.wait_outcome(e, &pending))?;
                if payloads.len() != 1 {
                    return Err(TopologyError::Protocol(format!(
                        "expected exactly one payload from {peer}, got {}",
                        payloads.len()
                    )));
                }
                received.push(self.codec.decode(&payloads[0])?);
                pending.remove(&peer);
            }
        }

        Ok(reducer.reduce(received))
    }

    /// Returns the subset of `pending` whose channel currently has a message, blocking
    /// until at least one does or `deadline` passes.
    ///
    /// The scan-then-drain step runs under `coordination`, the same lock `on_message`
    /// holds while appending to a channel and pushing its ready-signal; this is what
    /// lets the drain discard only genuinely stale signals without also discarding one
    /// that `on_message` is concurrently producing.
    fn wait_for_any(&self, pending: &BTreeSet<TaskId>, deadline: Instant) -> Result<Vec<TaskId>> {
        loop {
            {
                let _guard = self.coordination.lock().expect("coordination mutex poisoned");
                let ready: Vec<TaskId> = pending
                    .iter()
                    .filter(|peer| self.id_to_channel[*peer].has_message())
                    .cloned()
                    .collect();
                if !ready.is_empty() {
                    return Ok(ready);
                }
                self.ready_signal.drain_stale();
            }

            loop {
                match self.ready_signal.take(deadline, &self.cancel) {
                    Ok(peer) if pending.contains(&peer) => break,
                    Ok(_other) => continue,
                    Err(outcome) => return Err(self.wait_outcome(outcome, pending)),
                }
            }
        }
    }
}

/// Object-safe dispatch entrypoint used by the router, which sees only byte payloads
/// and `(group, operator)` names and never learns an operator's element type `T`.
pub trait Dispatch: Send + Sync {
    /// Appends an inbound message to the right mailbox. See [`OperatorTopology::on_message`].
    fn dispatch(&self, message: FramedMessage) -> Result<()>;
    /// Recovers `&dyn Any` so a typed façade accessor can downcast back to
    /// `OperatorTopology<T>`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Send + 'static> Dispatch for OperatorTopology<T> {
    fn dispatch(&self, message: FramedMessage) -> Result<()> {
        self.on_message(message)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn default_chunk_size(total: usize, children: usize) -> usize {
    if children == 0 {
        total.max(1)
    } else {
        total.div_ceil(children)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::FnCodec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NoopSender;
    impl Sender for NoopSender {
        fn send(
            &self,
            _group_name: &str,
            _operator_name: &str,
            _source: &TaskId,
            _destination: &TaskId,
            _payloads: Vec<Vec<u8>>,
            _kind: MessageKind,
        ) -> Result<()> {
            Ok(())
        }
    }

    struct AlwaysResolved;
    impl NameLookup for AlwaysResolved {
        fn lookup(&self, _task: &TaskId) -> Option<crate::sender::Endpoint> {
            Some(crate::sender::Endpoint("inproc".into()))
        }
    }

    struct NeverResolved(AtomicUsize);
    impl NameLookup for NeverResolved {
        fn lookup(&self, _task: &TaskId) -> Option<crate::sender::Endpoint> {
            self.0.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    fn u32_codec() -> Arc<dyn Codec<u32> + Send + Sync> {
        Arc::new(FnCodec::new(
            |v: &u32| Ok(v.to_be_bytes().to_vec()),
            |b: &[u8]| Ok(u32::from_be_bytes(b.try_into().unwrap())),
        ))
    }

    fn leaf_config(root: &str, me: &str) -> OperatorConfig {
        OperatorConfig {
            group_name: "g".into(),
            operator_name: "op".into(),
            self_task_id: TaskId::from(me),
            driver_id: TaskId::from("driver"),
            timeout_ms: 200,
            retry_count: 2,
            topology_root_task_id: TaskId::from(root),
            topology_child_task_ids: vec![],
        }
    }

    #[test]
    fn uninitialized_collectives_are_rejected() {
        let config = leaf_config("root", "leaf");
        let topo = OperatorTopology::new(
            &config,
            u32_codec(),
            Arc::new(AlwaysResolved),
            Arc::new(NoopSender),
        );
        let err = topo.send_to_parent(&1, MessageKind::Data).unwrap_err();
        assert!(matches!(err, TopologyError::NotInitialized { .. }));
    }

    #[test]
    fn closed_collectives_are_rejected() {
        let config = leaf_config("root", "leaf");
        let topo = OperatorTopology::new(
            &config,
            u32_codec(),
            Arc::new(AlwaysResolved),
            Arc::new(NoopSender),
        );
        topo.initialize().unwrap();
        topo.close();
        let err = topo.send_to_parent(&1, MessageKind::Data).unwrap_err();
        assert!(matches!(err, TopologyError::Closed { .. }));
    }

    #[test]
    fn root_has_no_parent() {
        let config = leaf_config("root", "root");
        let topo = OperatorTopology::new(
            &config,
            u32_codec(),
            Arc::new(AlwaysResolved),
            Arc::new(NoopSender),
        );
        topo.initialize().unwrap();
        let err = topo.send_to_parent(&1, MessageKind::Data).unwrap_err();
        assert!(matches!(err, TopologyError::NoParent(_)));
    }

    #[test]
    fn initialize_fails_after_retry_budget_with_unresolved_peer() {
        let config = leaf_config("root", "leaf");
        let name_client = Arc::new(NeverResolved(AtomicUsize::new(0)));
        let topo = OperatorTopology::new(
            &config,
            u32_codec(),
            name_client.clone(),
            Arc::new(NoopSender),
        );
        let err = topo.initialize().unwrap_err();
        match err {
            TopologyError::Initialization { peer, attempts } => {
                assert_eq!(peer, TaskId::from("root"));
                assert_eq!(attempts, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(name_client.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn on_message_from_unknown_peer_is_rejected() {
        let config = leaf_config("root", "leaf");
        let topo = OperatorTopology::new(
            &config,
            u32_codec(),
            Arc::new(AlwaysResolved),
            Arc::new(NoopSender),
        );
        topo.initialize().unwrap();
        let message = FramedMessage {
            group_name: "g".into(),
            operator_name: "op".into(),
            source: TaskId::from("stranger"),
            destination: TaskId::from("leaf"),
            kind: MessageKind::Data,
            payloads: vec![1u32.to_be_bytes().to_vec()],
        };
        let err = topo.on_message(message).unwrap_err();
        assert!(matches!(err, TopologyError::UnknownPeer(_)));
    }

    #[test]
    fn receive_from_parent_round_trips_through_on_message() {
        let config = leaf_config("root", "leaf");
        let topo = OperatorTopology::new(
            &config,
            u32_codec(),
            Arc::new(AlwaysResolved),
            Arc::new(NoopSender),
        );
        topo.initialize().unwrap();
        topo.on_message(FramedMessage {
            group_name: "g".into(),
            operator_name: "op".into(),
            source: TaskId::from("root"),
            destination: TaskId::from("leaf"),
            kind: MessageKind::Data,
            payloads: vec![42u32.to_be_bytes().to_vec()],
        })
        .unwrap();
        assert_eq!(topo.receive_from_parent().unwrap(), 42);
    }

    #[test]
    fn receive_from_parent_rejects_multi_payload_message() {
        let config = leaf_config("root", "leaf");
        let topo = OperatorTopology::new(
            &config,
            u32_codec(),
            Arc::new(AlwaysResolved),
            Arc::new(NoopSender),
        );
        topo.initialize().unwrap();
        topo.on_message(FramedMessage {
            group_name: "g".into(),
            operator_name: "op".into(),
            source: TaskId::from("root"),
            destination: TaskId::from("leaf"),
            kind: MessageKind::Data,
            payloads: vec![1u32.to_be_bytes().to_vec(), 2u32.to_be_bytes().to_vec()],
        })
        .unwrap();
        let err = topo.receive_from_parent().unwrap_err();
        assert!(matches!(err, TopologyError::Protocol(_)));
    }

    #[test]
    fn scatter_default_chunk_matches_spec_example() {
        // [a,b,c,d,e] over 2 children -> chunk_size 3 -> [a,b,c] / [d,e]
        let config = OperatorConfig {
            group_name: "g".into(),
            operator_name: "op".into(),
            self_task_id: TaskId::from("root"),
            driver_id: TaskId::from("driver"),
            timeout_ms: 200,
            retry_count: 1,
            topology_root_task_id: TaskId::from("root"),
            topology_child_task_ids: vec![TaskId::from("c0"), TaskId::from("c1")],
        };
        let topo = OperatorTopology::new(
            &config,
            u32_codec(),
            Arc::new(AlwaysResolved),
            Arc::new(NoopSender),
        );
        topo.initialize().unwrap();
        let messages = vec![1u32, 2, 3, 4, 5];
        // Exercise just the chunk-size computation via the ordering entrypoint.
        let order: Vec<TaskId> = vec![TaskId::from("c0"), TaskId::from("c1")];
        assert_eq!(default_chunk_size(messages.len(), order.len()), 3);
    }

    #[test]
    fn scatter_rejects_nonpositive_chunk_size() {
        let config = OperatorConfig {
            group_name: "g".into(),
            operator_name: "op".into(),
            self_task_id: TaskId::from("root"),
            driver_id: TaskId::from("driver"),
            timeout_ms: 200,
            retry_count: 1,
            topology_root_task_id: TaskId::from("root"),
            topology_child_task_ids: vec![TaskId::from("c0")],
        };
        let topo = OperatorTopology::new(
            &config,
            u32_codec(),
            Arc::new(AlwaysResolved),
            Arc::new(NoopSender),
        );
        topo.initialize().unwrap();
        let err = topo
            .scatter_to_children_chunked(&[1, 2, 3], 0, MessageKind::Data)
            .unwrap_err();
        assert!(matches!(err, TopologyError::Argument(_)));
    }

    #[test]
    fn scatter_rejects_mismatched_order_length() {
        let config = OperatorConfig {
            group_name: "g".into(),
            operator_name: "op".into(),
            self_task_id: TaskId::from("root"),
            driver_id: TaskId::from("driver"),
            timeout_ms: 200,
            retry_count: 1,
            topology_root_task_id: TaskId::from("root"),
            topology_child_task_ids: vec![TaskId::from("c0"), TaskId::from("c1")],
        };
        let topo = OperatorTopology::new(
            &config,
            u32_codec(),
            Arc::new(AlwaysResolved),
            Arc::new(NoopSender),
        );
        topo.initialize().unwrap();
        let order = vec![TaskId::from("c0")];
        let err = topo
            .scatter_to_children_ordered(&[1, 2, 3], &order, MessageKind::Data)
            .unwrap_err();
        assert!(matches!(err, TopologyError::Argument(_)));
    }

    #[test]
    fn receive_from_children_times_out_naming_silent_child() {
        let config = OperatorConfig {
            group_name: "g".into(),
            operator_name: "op".into(),
            self_task_id: TaskId::from("root"),
            driver_id: TaskId::from("driver"),
            timeout_ms: 60,
            retry_count: 1,
            topology_root_task_id: TaskId::from("root"),
            topology_child_task_ids: vec![TaskId::from("c0"), TaskId::from("c1")],
        };
        let topo = OperatorTopology::new(
            &config,
            u32_codec(),
            Arc::new(AlwaysResolved),
            Arc::new(NoopSender),
        );
        topo.initialize().unwrap();
        topo.on_message(FramedMessage {
            group_name: "g".into(),
            operator_name: "op".into(),
            source: TaskId::from("c0"),
            destination: TaskId::from("root"),
            kind: MessageKind::Data,
            payloads: vec![10u32.to_be_bytes().to_vec()],
        })
        .unwrap();

        let sum = |values: Vec<u32>| values.into_iter().sum();
        let err = topo.receive_from_children(&sum).unwrap_err();
        match err {
            TopologyError::ReceiveTimeout { peers, .. } => {
                assert_eq!(peers.len(), 1);
                assert!(peers.contains(&TaskId::from("c1")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
