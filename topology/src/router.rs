//! Dispatches each inbound framed message to the `(group, operator)` it names.
//!
//! This is the transport-binding half of the inbound boundary: the transport thread
//! calls [`MessageRouter::deliver`] once per received envelope, after decoding the
//! envelope's fixed fields but before any operator-specific decoding happens.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::error::{Result, TopologyError};
use crate::group_client::CommunicationGroupClient;
use crate::message::{FramedMessage, MessageKind};
use crate::sender::TaskId;

/// Routes inbound messages to the [`CommunicationGroupClient`] named by the envelope's
/// `group_name`, which in turn dispatches to the operator named by `operator_name`.
#[derive(Default)]
pub struct MessageRouter {
    groups: RwLock<HashMap<String, Arc<CommunicationGroupClient>>>,
}

impl MessageRouter {
    /// Builds an empty router.
    pub fn new() -> Self {
        MessageRouter {
            groups: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a group client so its operators become reachable by name. All
    /// operators are known once their owning `CommunicationGroupClient` finishes
    /// construction: no dynamic per-message observer registration is needed.
    pub fn register_group(&self, client: Arc<CommunicationGroupClient>) {
        self.groups
            .write()
            .expect("router mutex poisoned")
            .insert(client.group_name().to_owned(), client);
    }

    /// Looks up a previously registered group.
    pub fn group(&self, group_name: &str) -> Option<Arc<CommunicationGroupClient>> {
        self.groups
            .read()
            .expect("router mutex poisoned")
            .get(group_name)
            .cloned()
    }

    /// The transport hook: hands off an already-decoded envelope to its operator.
    #[allow(clippy::too_many_arguments)]
    pub fn deliver(
        &self,
        group_name: &str,
        operator_name: &str,
        source: TaskId,
        destination: TaskId,
        payloads: Vec<Vec<u8>>,
        kind: MessageKind,
    ) -> Result<()> {
        let group = self.group(group_name).ok_or_else(|| {
            warn!(group = group_name, operator = operator_name, "message for unknown group");
            TopologyError::Argument(format!("no communication group named '{group_name}'"))
        })?;
        group.dispatch(
            operator_name,
            FramedMessage {
                group_name: group_name.to_owned(),
                operator_name: operator_name.to_owned(),
                source,
                destination,
                kind,
                payloads,
            },
        )
    }
}
