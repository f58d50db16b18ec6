//! The RPC-method bodies, independent of transport (spec.md section 6's
//! table): each function here implements exactly one row. `service.rs`
//! exposes these over tonic; `rpc.rs`'s local short-circuit calls them
//! in-process when the target address is this node's own address
//! (spec.md section 4.B: "even when p == self_addr, via the local dispatch
//! path").

use crate::finger::Address;
use crate::id;
use crate::modrange::ModRange;
use crate::rpc::RpcHandle;
use crate::state::SharedState;
use crate::{constants::NODES, error::ChordResult};

pub fn successor(state: &SharedState) -> Address {
    state.lock().unwrap().successor()
}

pub fn get_predecessor(state: &SharedState) -> Address {
    state.lock().unwrap().predecessor.clone()
}

pub fn set_predecessor(state: &SharedState, addr: Address) {
    state.lock().unwrap().predecessor = addr;
}

/// `closest_preceding_finger(id)`: scan `k` from `M` down to `1`, returning
/// the first finger whose node lies strictly between this node and `id`.
pub fn closest_preceding_finger(state: &SharedState, target_id: u32) -> ChordResult<Address> {
    let guard = state.lock().unwrap();
    for k in (1..=crate::constants::M).rev() {
        let finger = guard.finger_table.get(k)?;
        let finger_id = id::id_of_address(&finger.node);
        let interval = ModRange::new(guard.self_id.wrapping_add(1) % NODES, target_id, NODES);
        if interval.contains(finger_id) {
            return Ok(finger.node.clone());
        }
    }
    Ok(guard.self_addr.clone())
}

pub fn add_key(state: &SharedState, key: String, value: String) -> &'static str {
    state.lock().unwrap().keys.insert(key, value);
    "Added"
}

pub fn get_key_data(state: &SharedState, key: &str) -> (u32, Option<String>) {
    let guard = state.lock().unwrap();
    (guard.self_id, guard.keys.get(key).cloned())
}

/// `update_finger_table(s, k)`: adopt `s` as finger `k` if `s` lies in
/// `[finger[k].start, id(finger[k].node))` and `finger[k]` isn't already the
/// fixed point `finger[k].start == id(finger[k].node)`; propagate the update
/// counter-clockwise to our predecessor and stop once `s` is no longer
/// closer than the current entry (spec.md section 4.D).
pub async fn update_finger_table(state: &SharedState, rpc: &RpcHandle, s: Address, k: u32) -> ChordResult<()> {
    let s_id = id::id_of_address(&s);
    let should_update = {
        let mut guard = state.lock().unwrap();
        let finger = guard.finger_table.get(k)?;
        let finger_node_id = id::id_of_address(&finger.node);
        let update = finger.start != finger_node_id
            && ModRange::new(finger.start, finger_node_id, NODES).contains(s_id);
        if update {
            guard.finger_table.set_node(k, s.clone())?;
        }
        update
    };

    if should_update {
        let (predecessor, self_addr) = {
            let guard = state.lock().unwrap();
            (guard.predecessor.clone(), guard.self_addr.clone())
        };
        if predecessor != self_addr {
            rpc.update_finger_table(&predecessor, s, k).await?;
        }
    }
    Ok(())
}

/// `migrate_data()`: invoked on the successor by a newly joined node after
/// the successor's predecessor pointer has already been repointed to the
/// new node (`init_finger_table` step 3). The successor's newly-owned range
/// is `(id(new_node), self_id]`; anything it holds outside that range
/// belongs to the new node and is handed off (spec.md design note 3 /
/// SPEC_FULL.md section 4.D).
pub async fn migrate_data(state: &SharedState, rpc: &RpcHandle) -> ChordResult<()> {
    let (self_id, new_node, snapshot) = {
        let guard = state.lock().unwrap();
        (guard.self_id, guard.predecessor.clone(), guard.keys.clone())
    };
    let new_node_id = id::id_of_address(&new_node);
    let kept = ModRange::new(new_node_id.wrapping_add(1) % NODES, self_id.wrapping_add(1) % NODES, NODES);

    for (key, value) in snapshot {
        let key_id = id::id_of_key(&key);
        if !kept.contains(key_id) {
            rpc.add_key(&new_node, key.clone(), value).await?;
            state.lock().unwrap().keys.remove(&key);
        }
    }
    Ok(())
}
