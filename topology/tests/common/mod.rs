//! Shared test harness: an in-process fabric that stands in for the name service and
//! transport, so end-to-end scenarios can run against real `OperatorTopology` instances
//! without any actual networking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use groupcomm_topology::{
    Dispatch, Endpoint, FramedMessage, MessageKind, NameLookup, OperatorConfig, Result, Sender,
    TaskId, TopologyError,
};

/// Every task registers an endpoint (for name-service lookups) and a `Dispatch` handle
/// (its operator's inbound hook) before `initialize()` runs on any topology built against
/// this fabric. `Fabric` itself is the `Sender` every topology is built with.
#[derive(Default)]
pub struct Fabric {
    endpoints: Mutex<HashMap<TaskId, Endpoint>>,
    inboxes: Mutex<HashMap<TaskId, Arc<dyn Dispatch>>>,
}

impl Fabric {
    pub fn new() -> Arc<Self> {
        Arc::new(Fabric::default())
    }

    /// Publishes `task`'s endpoint so `lookup` succeeds, without wiring an inbox. Used
    /// for the init-failure scenario, where a peer deliberately never registers.
    pub fn publish(&self, task: &TaskId) {
        self.endpoints
            .lock()
            .unwrap()
            .insert(task.clone(), Endpoint(task.to_string()));
    }

    /// Publishes `task`'s endpoint and binds its operator as the inbox that receives
    /// messages addressed to it.
    pub fn register(&self, task: &TaskId, operator: Arc<dyn Dispatch>) {
        self.publish(task);
        self.inboxes.lock().unwrap().insert(task.clone(), operator);
    }
}

impl NameLookup for Fabric {
    fn lookup(&self, task: &TaskId) -> Option<Endpoint> {
        self.endpoints.lock().unwrap().get(task).cloned()
    }
}

impl Sender for Fabric {
    fn send(
        &self,
        group_name: &str,
        operator_name: &str,
        source: &TaskId,
        destination: &TaskId,
        payloads: Vec<Vec<u8>>,
        kind: MessageKind,
    ) -> Result<()> {
        let inbox = self
            .inboxes
            .lock()
            .unwrap()
            .get(destination)
            .cloned()
            .ok_or_else(|| TopologyError::UnknownPeer(destination.clone()))?;
        inbox.dispatch(FramedMessage {
            group_name: group_name.to_owned(),
            operator_name: operator_name.to_owned(),
            source: source.clone(),
            destination: destination.clone(),
            kind,
            payloads,
        })
    }
}

/// A plain big-endian `u32` codec, used by every scenario below.
pub fn u32_codec() -> Arc<dyn groupcomm_topology::Codec<u32> + Send + Sync> {
    Arc::new(groupcomm_topology::FnCodec::new(
        |v: &u32| Ok(v.to_be_bytes().to_vec()),
        |b: &[u8]| {
            let arr: [u8; 4] = b
                .try_into()
                .map_err(|_| TopologyError::Codec("expected 4 bytes".into()))?;
            Ok(u32::from_be_bytes(arr))
        },
    ))
}

pub fn config(
    self_id: &str,
    root: &str,
    children: &[&str],
    timeout_ms: u64,
    retry_count: usize,
) -> OperatorConfig {
    OperatorConfig {
        group_name: "g".into(),
        operator_name: "op".into(),
        self_task_id: TaskId::from(self_id),
        driver_id: TaskId::from("driver"),
        timeout_ms,
        retry_count,
        topology_root_task_id: TaskId::from(root),
        topology_child_task_ids: children.iter().map(|c| TaskId::from(*c)).collect(),
    }
}
