//! Per-operator configuration, as bound by the driver.
//!
//! The wire format of this descriptor is external to the topology (the driver may ship
//! it as a serialized protocol-buffer, JSON, whatever); this module only fixes the
//! fields the engine reads out of it. `OperatorConfig` itself derives `Deserialize` so a
//! binding layer can parse the driver's payload directly into it when the format happens
//! to be JSON; other formats decode into this struct by hand.

use serde::{Deserialize, Serialize};

use crate::sender::TaskId;

/// Default timeout for blocking collectives, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 50_000;
/// Default number of name-service lookup attempts during `initialize`.
pub const DEFAULT_RETRY_COUNT: usize = 10;
/// Fixed backoff between name-service lookup retries, in milliseconds.
pub const RETRY_BACKOFF_MS: u64 = 500;

/// Driver-provided configuration for a single operator instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Logical communication group this operator belongs to.
    pub group_name: String,
    /// Operator instance name within the group.
    pub operator_name: String,
    /// This task's own identifier.
    pub self_task_id: TaskId,
    /// Identifier of the driver, for control-plane traffic (unused by the core today).
    pub driver_id: TaskId,
    /// Blocking-receive timeout, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Name-service lookup retry budget for `initialize`.
    #[serde(default = "default_retry_count")]
    pub retry_count: usize,
    /// Root of this operator's tree.
    pub topology_root_task_id: TaskId,
    /// Children of this node in the tree, in driver-declared order.
    #[serde(default)]
    pub topology_child_task_ids: Vec<TaskId>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_retry_count() -> usize {
    DEFAULT_RETRY_COUNT
}

impl OperatorConfig {
    /// True iff `self_task_id` is the root of the tree (no parent).
    pub fn is_root(&self) -> bool {
        self.topology_root_task_id == self.self_task_id
    }
}
