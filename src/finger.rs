//! Finger table data structure (spec.md section 3/4.A), generalized from the
//! teacher's 1-indexed `Vec<FingerEntry>` `finger_table.rs` into a
//! zero-indexed `Vec` of length `M` (design note 3): index `i` here holds
//! finger `k = i + 1`.

use crate::constants::{M, NODES};
use crate::error::{ChordError, ChordResult};
use crate::modrange::ModRange;

pub type Address = String;

#[derive(Debug, Clone)]
pub struct FingerEntry {
    pub start: u32,
    pub next_start: u32,
    pub interval: ModRange,
    pub node: Address,
}

impl FingerEntry {
    /// Builds finger `k` (1-indexed, `1..=M`) for a node of identifier `n`,
    /// with `node` initialized to `n`'s own address until the join protocol
    /// populates it.
    pub fn new(n: u32, k: u32, self_addr: &Address) -> ChordResult<Self> {
        if n >= NODES {
            return Err(ChordError::IdOutOfRange(n));
        }
        if k == 0 || k > M {
            return Err(ChordError::InvalidFingerIndex(k));
        }
        let start = n.wrapping_add(1u32.wrapping_shl(k - 1)) % NODES;
        let next_start = if k < M {
            n.wrapping_add(1u32.wrapping_shl(k)) % NODES
        } else {
            n
        };
        Ok(FingerEntry {
            start,
            next_start,
            interval: ModRange::new(start, next_start, NODES),
            node: self_addr.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct FingerTable {
    entries: Vec<FingerEntry>,
}

impl FingerTable {
    pub fn new(self_id: u32, self_addr: &Address) -> ChordResult<Self> {
        let mut entries = Vec::with_capacity(M as usize);
        for k in 1..=M {
            entries.push(FingerEntry::new(self_id, k, self_addr)?);
        }
        Ok(FingerTable { entries })
    }

    fn index(k: u32) -> ChordResult<usize> {
        if k == 0 || k > M {
            return Err(ChordError::InvalidFingerIndex(k));
        }
        Ok((k - 1) as usize)
    }

    pub fn get(&self, k: u32) -> ChordResult<&FingerEntry> {
        Ok(&self.entries[Self::index(k)?])
    }

    pub fn set_node(&mut self, k: u32, addr: Address) -> ChordResult<()> {
        let idx = Self::index(k)?;
        self.entries[idx].node = addr;
        Ok(())
    }

    pub fn set_all(&mut self, addr: &Address) {
        for entry in self.entries.iter_mut() {
            entry.node = addr.clone();
        }
    }

    pub fn successor(&self) -> Address {
        self.entries[0].node.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FingerEntry> {
        self.entries.iter()
    }
}
