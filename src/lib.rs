//! A node of the Chord distributed hash table (spec.md). See `SPEC_FULL.md`
//! and `DESIGN.md` for the full requirements and grounding ledger.

pub mod app;
pub mod cli;
pub mod constants;
pub mod error;
pub mod finger;
pub mod handlers;
pub mod id;
pub mod modrange;
pub mod node;
pub mod protocol;
pub mod rpc;
pub mod service;
pub mod state;
pub mod wire;

pub mod proto {
    tonic::include_proto!("chord");
}
