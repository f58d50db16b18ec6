//! Conversions between core types and their protobuf wire counterparts,
//! concentrated in one module (SPEC_FULL.md section 3) instead of scattered
//! across per-thread files the way the teacher's `node/conversions.rs`
//! references were split up.

use crate::finger::Address;
use crate::proto;

pub use proto::{AddedReply, AddressReply, KeyDataReply, QueryReply};

pub fn address_reply(addr: Address) -> proto::AddressReply {
    proto::AddressReply { address: addr }
}

pub fn address_request(addr: Address) -> proto::AddressRequest {
    proto::AddressRequest { address: addr }
}

pub fn id_request(id: u32) -> proto::IdRequest {
    proto::IdRequest { id }
}

pub fn update_finger_table_request(addr: Address, k: u32) -> proto::UpdateFingerTableRequest {
    proto::UpdateFingerTableRequest { address: addr, index: k }
}

pub fn key_value_request(key: String, value: String) -> proto::KeyValueRequest {
    proto::KeyValueRequest { key, value }
}

pub fn key_request(key: String) -> proto::KeyRequest {
    proto::KeyRequest { key }
}

pub fn added_reply(status: impl Into<String>) -> proto::AddedReply {
    proto::AddedReply { status: status.into() }
}

pub fn key_data_reply(node_id: u32, value: Option<String>) -> proto::KeyDataReply {
    proto::KeyDataReply { node_id, value }
}

pub fn query_reply(node_id: u32, value: String) -> proto::QueryReply {
    proto::QueryReply { node_id, value }
}
