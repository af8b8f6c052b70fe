//! Task-level singleton: registers this task with the name service, owns one
//! [`CommunicationGroupClient`] per group the driver bound to this task, and routes
//! inbound framed messages to the right `(group, operator)` pair.

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::group_client::CommunicationGroupClient;
use crate::message::MessageKind;
use crate::router::MessageRouter;
use crate::sender::{Endpoint, NameRegistrar, Sender, TaskId};

/// Owns the per-task pieces of the group communication runtime: name-service
/// registration, the transport handle, and every communication group this task
/// participates in.
pub struct GroupCommClient {
    self_id: TaskId,
    registrar: Arc<dyn NameRegistrar>,
    #[allow(dead_code)] // kept alive for the lifetime of the client; operators hold their own clone
    transport: Arc<dyn Sender>,
    router: MessageRouter,
}

impl GroupCommClient {
    /// Registers `self_id` with the name service at `endpoint`, then returns an empty
    /// client ready to have groups added via [`GroupCommClient::add_group`].
    pub fn new(
        self_id: TaskId,
        endpoint: Endpoint,
        registrar: Arc<dyn NameRegistrar>,
        transport: Arc<dyn Sender>,
    ) -> Result<Self> {
        registrar.register(&self_id, endpoint)?;
        info!(task = %self_id, "registered with name service");
        Ok(GroupCommClient {
            self_id,
            registrar,
            transport,
            router: MessageRouter::new(),
        })
    }

    /// This task's own identifier.
    pub fn self_id(&self) -> &TaskId {
        &self.self_id
    }

    /// Registers a fully initialized group so its operators become reachable by the
    /// router and by [`GroupCommClient::group`].
    pub fn add_group(&self, client: CommunicationGroupClient) {
        self.router.register_group(Arc::new(client));
    }

    /// Looks up a previously added group by name.
    pub fn group(&self, group_name: &str) -> Option<Arc<CommunicationGroupClient>> {
        self.router.group(group_name)
    }

    /// The transport hook: routes an already-decoded envelope to its operator.
    pub fn deliver(
        &self,
        group_name: &str,
        operator_name: &str,
        source: TaskId,
        destination: TaskId,
        payloads: Vec<Vec<u8>>,
        kind: MessageKind,
    ) -> Result<()> {
        self.router
            .deliver(group_name, operator_name, source, destination, payloads, kind)
    }

    /// Unregisters from the name service. Draining in-flight messages is not attempted;
    /// this is a best-effort close, matching the operator topologies it owns.
    pub fn shutdown(&self) -> Result<()> {
        self.registrar.unregister(&self.self_id)
    }
}
