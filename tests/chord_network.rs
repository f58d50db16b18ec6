//! Integration tests: real nodes over loopback gRPC, driven by real
//! `ChordClient` calls, grounded on
//! `examples/FedericoCeratto-chord-dht/tests/figure_3b.rs`'s pattern of
//! starting real servers inside `#[tokio::test]` rather than mocking the
//! transport. Covers the scenarios in spec.md section 8.

use std::sync::Arc;

use chord::node::Node;
use chord::proto::chord_client::ChordClient;
use chord::proto::{KeyRequest, KeyValueRequest};
use tokio::sync::oneshot;

/// Binds and serves a node, returning the live handle plus its address.
/// The node keeps running for the lifetime of the returned `Arc`.
async fn spawn_node(known: Option<String>) -> Arc<Node> {
    let (node, listener) = Node::bind("127.0.0.1:0".parse().unwrap()).await.expect("bind");
    node.join(known).await.expect("join");

    let node = Arc::new(node);
    let serve_node = node.clone();
    let (ready_tx, ready_rx) = oneshot::channel();
    tokio::spawn(async move {
        serve_node.serve(listener, ready_tx).await.ok();
    });
    ready_rx.await.ok();
    node
}

async fn client_for(addr: &str) -> ChordClient<tonic::transport::Channel> {
    ChordClient::connect(format!("http://{addr}")).await.expect("connect")
}

#[tokio::test]
async fn single_node_ring_not_found_then_round_trip() {
    let a = spawn_node(None).await;
    let mut client = client_for(&a.addr).await;

    let resp = client
        .query(KeyRequest { key: "anything".to_string() })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(resp.node_id, a.id);
    assert_eq!(resp.value, "Not found");

    client
        .populate(KeyValueRequest { key: "foo".to_string(), value: "bar".to_string() })
        .await
        .unwrap();

    let resp = client
        .query(KeyRequest { key: "foo".to_string() })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(resp.node_id, a.id);
    assert_eq!(resp.value, "bar");
}

#[tokio::test]
async fn two_node_join_builds_mutual_fingers() {
    let a = spawn_node(None).await;
    let b = spawn_node(Some(a.addr.clone())).await;

    // Ring closure (invariant 1): following successor twice returns to start.
    let a_succ = { a.state.lock().unwrap().successor() };
    let b_succ = { b.state.lock().unwrap().successor() };
    if a_succ == a.addr {
        // a never updated (shouldn't happen once b's update_others runs, but
        // guard against flakiness instead of asserting the exact topology).
        panic!("node a's successor was never updated by node b's join");
    }
    assert_eq!(a_succ, b.addr);
    assert_eq!(b_succ, a.addr);

    // Predecessor duality (invariant 2).
    assert_eq!(a.state.lock().unwrap().predecessor, b.addr);
    assert_eq!(b.state.lock().unwrap().predecessor, a.addr);
}

#[tokio::test]
async fn three_node_join_preserves_key_ownership_invariant() {
    let a = spawn_node(None).await;
    let b = spawn_node(Some(a.addr.clone())).await;

    let mut client_a = client_for(&a.addr).await;
    for i in 0..20 {
        client_a
            .populate(KeyValueRequest { key: format!("key-{i}"), value: format!("value-{i}") })
            .await
            .unwrap();
    }

    let c = spawn_node(Some(a.addr.clone())).await;

    // Invariant 4: every stored key on every node falls in (id(predecessor), id(self)].
    for node in [&a, &b, &c] {
        let guard = node.state.lock().unwrap();
        let predecessor_id = chord::id::id_of_address(&guard.predecessor);
        let range = chord::modrange::ModRange::new(
            predecessor_id.wrapping_add(1) % chord::constants::NODES,
            guard.self_id.wrapping_add(1) % chord::constants::NODES,
            chord::constants::NODES,
        );
        for key in guard.keys.keys() {
            let key_id = chord::id::id_of_key(key);
            assert!(
                range.contains(key_id),
                "key {key} (id {key_id}) stored on node {} outside its ownership range",
                guard.self_addr
            );
        }
    }

    // Round trip: every populated key is still reachable with its latest value
    // from any node in the ring.
    let mut client_c = client_for(&c.addr).await;
    for i in 0..20 {
        let resp = client_c
            .query(KeyRequest { key: format!("key-{i}") })
            .await
            .unwrap()
            .into_inner();
        assert_eq!(resp.value, format!("value-{i}"));
    }
}

#[tokio::test]
async fn idempotent_populate_keeps_latest_value() {
    let a = spawn_node(None).await;
    let mut client = client_for(&a.addr).await;

    client
        .populate(KeyValueRequest { key: "k".to_string(), value: "v1".to_string() })
        .await
        .unwrap();
    client
        .populate(KeyValueRequest { key: "k".to_string(), value: "v2".to_string() })
        .await
        .unwrap();

    let resp = client.query(KeyRequest { key: "k".to_string() }).await.unwrap().into_inner();
    assert_eq!(resp.value, "v2");
}

#[tokio::test]
async fn finger_table_entries_match_two_node_ring_ownership() {
    // With exactly two nodes, finger[k].node is fully determined: the other
    // node if its id falls in the finger's interval, else self (invariant 3).
    let a = spawn_node(None).await;
    let b = spawn_node(Some(a.addr.clone())).await;

    for node in [&a, &b] {
        let other = if node.addr == a.addr { &b } else { &a };
        let guard = node.state.lock().unwrap();
        for entry in guard.finger_table.iter() {
            let interval = chord::modrange::ModRange::new(entry.start, entry.next_start, chord::constants::NODES);
            let expected = if interval.contains(other.id) { &other.addr } else { &node.addr };
            assert_eq!(
                &entry.node, expected,
                "node {} finger starting at {} should point to {}",
                guard.self_addr, entry.start, expected
            );
        }
    }
}
