//! Node state (spec.md component 4.C): own address/id, predecessor pointer,
//! finger table, and the local key-value map, bundled behind a single mutex
//! per the concurrency policy in spec.md section 5 / SPEC_FULL.md section 5
//! (one lock covers all three fields, simplifying "never hold the lock
//! across an outbound RPC" relative to the teacher's three separate
//! `Arc<Mutex<_>>` fields in `threads/chord.rs::ChordService`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::ChordResult;
use crate::finger::{Address, FingerTable};

#[derive(Debug)]
pub struct NodeState {
    pub self_addr: Address,
    pub self_id: u32,
    pub predecessor: Address,
    pub finger_table: FingerTable,
    pub keys: HashMap<String, String>,
}

pub type SharedState = Arc<Mutex<NodeState>>;

impl NodeState {
    pub fn new(self_addr: Address, self_id: u32) -> ChordResult<Self> {
        let finger_table = FingerTable::new(self_id, &self_addr)?;
        Ok(NodeState {
            predecessor: self_addr.clone(),
            self_addr,
            self_id,
            finger_table,
            keys: HashMap::new(),
        })
    }

    pub fn successor(&self) -> Address {
        self.finger_table.successor()
    }
}
