//! The Chord protocol engine (spec.md component 4.D): the distributed
//! routing and join algorithms. These functions are reentrant — they run
//! identically whether invoked locally (by `populate`/`query`/the join
//! driver) or remotely (an incoming `find_successor`/`find_predecessor` RPC
//! served on behalf of a peer), operating on whichever `state` belongs to
//! the node currently serving the call.

use crate::constants::{M, NODES};
use crate::error::{ChordError, ChordResult};
use crate::finger::Address;
use crate::id;
use crate::modrange::ModRange;
use crate::rpc::RpcHandle;
use crate::state::SharedState;

/// Explicit hop bound for `find_predecessor`'s routing loop (spec.md
/// section 5's suggested safety valve), absent from the original source.
const MAX_HOPS: usize = 2 * M as usize;

/// `find_predecessor(id)`: iterative routing starting from this node,
/// repeatedly asking the closest preceding finger to take over until the
/// current candidate's successor straddles `id`.
pub async fn find_predecessor(state: &SharedState, rpc: &RpcHandle, target_id: u32) -> ChordResult<Address> {
    let (mut p, mut p_id) = {
        let guard = state.lock().unwrap();
        (guard.self_addr.clone(), guard.self_id)
    };

    for hop in 0.. {
        if hop > MAX_HOPS {
            return Err(ChordError::RoutingLoopExceeded { id: target_id, hops: hop });
        }
        let succ = rpc.successor(&p).await?;
        let succ_id = id::id_of_address(&succ);
        let membership = ModRange::new(p_id.wrapping_add(1) % NODES, succ_id.wrapping_add(1) % NODES, NODES);
        if membership.contains(target_id) {
            return Ok(p);
        }
        p = rpc.closest_preceding_finger(&p, target_id).await?;
        p_id = id::id_of_address(&p);
    }
    unreachable!("for loop with unconditional range never terminates other than by return/err")
}

/// `find_successor(id)`: delegate to `find_predecessor` and return that
/// node's successor.
pub async fn find_successor(state: &SharedState, rpc: &RpcHandle, target_id: u32) -> ChordResult<Address> {
    let predecessor = find_predecessor(state, rpc, target_id).await?;
    rpc.successor(&predecessor).await
}

/// `init_finger_table(np)`: populate this node's finger table from a known
/// member `np`, following the Chord-paper-correct bound
/// `ModRange(self_id, id(finger[k].node), NODES)` for the "skip the RPC"
/// shortcut (spec.md open question 1, resolved in SPEC_FULL.md section 4.D).
pub async fn init_finger_table(state: &SharedState, rpc: &RpcHandle, np: &Address) -> ChordResult<()> {
    let self_id = state.lock().unwrap().self_id;

    let finger_1_start = state.lock().unwrap().finger_table.get(1)?.start;
    let finger_1_node = rpc.find_successor(np, finger_1_start).await?;
    state.lock().unwrap().finger_table.set_node(1, finger_1_node.clone())?;

    let predecessor = rpc.get_predecessor(&finger_1_node).await?;
    let self_addr = state.lock().unwrap().self_addr.clone();
    state.lock().unwrap().predecessor = predecessor;
    rpc.set_predecessor(&finger_1_node, self_addr).await?;

    let mut prev_finger_node = finger_1_node;
    for k in 1..M {
        let next_start = state.lock().unwrap().finger_table.get(k + 1)?.start;
        let prev_finger_node_id = id::id_of_address(&prev_finger_node);
        let new_node = if ModRange::new(self_id, prev_finger_node_id, NODES).contains(next_start) {
            prev_finger_node.clone()
        } else {
            rpc.find_successor(np, next_start).await?
        };
        state.lock().unwrap().finger_table.set_node(k + 1, new_node.clone())?;
        prev_finger_node = new_node;
    }
    Ok(())
}

/// `update_others()`: for each finger index, find the predecessor of the
/// point this node's join could have displaced and ask it to reconsider its
/// own finger `k` (spec.md open question 2, resolved directly via the
/// Chord paper's `n - 2^(k-1) + 1` fed to `find_predecessor`, without the
/// original source's extra `+1`).
pub async fn update_others(state: &SharedState, rpc: &RpcHandle) -> ChordResult<()> {
    let self_id = state.lock().unwrap().self_id;
    let self_addr = state.lock().unwrap().self_addr.clone();

    for k in 1..=M {
        let offset = 1u32.wrapping_shl(k - 1);
        let pre_id = (self_id.wrapping_sub(offset).wrapping_add(NODES)) % NODES;
        let p = find_predecessor(state, rpc, pre_id).await?;
        rpc.update_finger_table(&p, self_addr.clone(), k).await?;
    }
    Ok(())
}

/// `join_network(known)`: the top-level join driver. `known == None` means
/// "form a new ring" (spec.md's sentinel port `0`, expressed here as the
/// absence of a `--peer` argument, SPEC_FULL.md section 6).
pub async fn join_network(state: &SharedState, rpc: &RpcHandle, known: Option<Address>) -> ChordResult<()> {
    match known {
        None => {
            let self_addr = state.lock().unwrap().self_addr.clone();
            let mut guard = state.lock().unwrap();
            guard.finger_table.set_all(&self_addr);
            guard.predecessor = self_addr;
            Ok(())
        }
        Some(np) => {
            init_finger_table(state, rpc, &np).await?;
            let successor = state.lock().unwrap().successor();
            rpc.migrate_data(&successor).await?;
            update_others(state, rpc).await?;
            Ok(())
        }
    }
}
