//! Application operations (spec.md component 4.E): the client-facing
//! `populate`/`query` RPCs layered on top of the protocol engine, plus the
//! `add_key`/`get_key_data` storage primitives they delegate to (those two
//! live in `handlers.rs` since they're also directly addressable RPCs).

use crate::id;
use crate::protocol;
use crate::rpc::RpcHandle;
use crate::state::SharedState;
use crate::error::ChordResult;

pub async fn populate(state: &SharedState, rpc: &RpcHandle, key: String, value: String) -> ChordResult<String> {
    let key_id = id::id_of_key(&key);
    let owner = protocol::find_successor(state, rpc, key_id).await?;
    rpc.add_key(&owner, key, value).await
}

pub async fn query(state: &SharedState, rpc: &RpcHandle, key: String) -> ChordResult<(u32, Option<String>)> {
    let key_id = id::id_of_key(&key);
    let owner = protocol::find_successor(state, rpc, key_id).await?;
    rpc.get_key_data(&owner, key).await
}
