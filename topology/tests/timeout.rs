mod common;

use std::sync::Arc;

use groupcomm_topology::{MessageKind, OperatorTopology, TaskId, TopologyError};

use common::{config, u32_codec, Fabric};

#[test]
fn receive_from_children_names_the_silent_child_on_timeout() {
    let fabric = Fabric::new();

    let root_cfg = config("root", "root", &["c0", "c1"], 80, 3);
    let root = Arc::new(OperatorTopology::new(
        &root_cfg,
        u32_codec(),
        fabric.clone(),
        fabric.clone(),
    ));
    fabric.register(&root_cfg.self_task_id, root.clone());

    let c0_cfg = config("c0", "root", &[], 80, 3);
    let c0 = Arc::new(OperatorTopology::new(
        &c0_cfg,
        u32_codec(),
        fabric.clone(),
        fabric.clone(),
    ));
    fabric.register(&c0_cfg.self_task_id, c0.clone());

    // c1 resolves through the name service (so `initialize` succeeds) but never
    // constructs an operator or sends anything.
    fabric.publish(&TaskId::from("c1"));

    root.initialize().unwrap();
    c0.initialize().unwrap();

    c0.send_to_parent(&10, MessageKind::Data).unwrap();

    let sum = |values: Vec<u32>| values.into_iter().sum();
    let err = root.receive_from_children(&sum).unwrap_err();
    match err {
        TopologyError::ReceiveTimeout { peers, .. } => {
            assert_eq!(peers.len(), 1);
            assert!(peers.contains(&TaskId::from("c1")));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
