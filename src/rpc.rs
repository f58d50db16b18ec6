//! RPC transport adapter (spec.md component 4.B): `call`/`serve` realized
//! over `tonic`. `RpcHandle` is the `call` side — it either dials a peer
//! over gRPC or, when the target is this node's own address, short-circuits
//! into the in-process handler (no loopback TCP round trip), per spec.md's
//! "even when p == self_addr, via the local dispatch path" requirement.
//!
//! Grounded on the teacher's `connect_with_retry` in `threads/chord.rs`,
//! simplified to a single bounded connect attempt with an explicit timeout
//! (SPEC_FULL.md section 5: the teacher has no per-RPC timeout, this crate
//! adds one).

use std::time::Duration;

use tonic::Request;

use crate::error::{ChordError, ChordResult};
use crate::finger::Address;
use crate::handlers;
use crate::proto::chord_client::ChordClient;
use crate::state::SharedState;
use crate::wire;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct RpcHandle {
    self_addr: Address,
    state: SharedState,
}

impl RpcHandle {
    pub fn new(self_addr: Address, state: SharedState) -> Self {
        RpcHandle { self_addr, state }
    }

    pub fn self_addr(&self) -> &Address {
        &self.self_addr
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    fn is_local(&self, addr: &Address) -> bool {
        addr == &self.self_addr
    }

    async fn connect(&self, addr: &Address) -> ChordResult<ChordClient<tonic::transport::Channel>> {
        let endpoint = tonic::transport::Endpoint::from_shared(format!("http://{addr}"))
            .map_err(|source| ChordError::Unreachable { addr: addr.clone(), source })?
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT);
        endpoint
            .connect()
            .await
            .map(ChordClient::new)
            .map_err(|source| ChordError::Unreachable { addr: addr.clone(), source })
    }

    fn rpc_failed(addr: &Address, status: tonic::Status) -> ChordError {
        ChordError::RpcFailed { addr: addr.clone(), status }
    }

    pub async fn successor(&self, addr: &Address) -> ChordResult<Address> {
        if self.is_local(addr) {
            return Ok(handlers::successor(&self.state));
        }
        let mut client = self.connect(addr).await?;
        let resp = client
            .successor(Request::new(crate::proto::Empty {}))
            .await
            .map_err(|s| Self::rpc_failed(addr, s))?;
        Ok(resp.into_inner().address)
    }

    pub async fn get_predecessor(&self, addr: &Address) -> ChordResult<Address> {
        if self.is_local(addr) {
            return Ok(handlers::get_predecessor(&self.state));
        }
        let mut client = self.connect(addr).await?;
        let resp = client
            .get_predecessor(Request::new(crate::proto::Empty {}))
            .await
            .map_err(|s| Self::rpc_failed(addr, s))?;
        Ok(resp.into_inner().address)
    }

    pub async fn set_predecessor(&self, addr: &Address, new_predecessor: Address) -> ChordResult<()> {
        if self.is_local(addr) {
            handlers::set_predecessor(&self.state, new_predecessor);
            return Ok(());
        }
        let mut client = self.connect(addr).await?;
        client
            .set_predecessor(Request::new(wire::address_request(new_predecessor)))
            .await
            .map_err(|s| Self::rpc_failed(addr, s))?;
        Ok(())
    }

    pub async fn closest_preceding_finger(&self, addr: &Address, id: u32) -> ChordResult<Address> {
        if self.is_local(addr) {
            return handlers::closest_preceding_finger(&self.state, id);
        }
        let mut client = self.connect(addr).await?;
        let resp = client
            .closest_preceding_finger(Request::new(wire::id_request(id)))
            .await
            .map_err(|s| Self::rpc_failed(addr, s))?;
        Ok(resp.into_inner().address)
    }

    /// `find_successor` and `find_predecessor` run the full routing
    /// algorithm on whichever node serves them, so a remote call here
    /// reenters that node's own protocol engine rather than a simple getter
    /// (spec.md section 4.D).
    pub async fn find_successor(&self, addr: &Address, id: u32) -> ChordResult<Address> {
        if self.is_local(addr) {
            return crate::protocol::find_successor(&self.state, self, id).await;
        }
        let mut client = self.connect(addr).await?;
        let resp = client
            .find_successor(Request::new(wire::id_request(id)))
            .await
            .map_err(|s| Self::rpc_failed(addr, s))?;
        Ok(resp.into_inner().address)
    }

    pub async fn find_predecessor(&self, addr: &Address, id: u32) -> ChordResult<Address> {
        if self.is_local(addr) {
            return crate::protocol::find_predecessor(&self.state, self, id).await;
        }
        let mut client = self.connect(addr).await?;
        let resp = client
            .find_predecessor(Request::new(wire::id_request(id)))
            .await
            .map_err(|s| Self::rpc_failed(addr, s))?;
        Ok(resp.into_inner().address)
    }

    pub async fn update_finger_table(&self, addr: &Address, s: Address, k: u32) -> ChordResult<()> {
        if self.is_local(addr) {
            return handlers::update_finger_table(&self.state, self, s, k).await;
        }
        let mut client = self.connect(addr).await?;
        client
            .update_finger_table(Request::new(wire::update_finger_table_request(s, k)))
            .await
            .map_err(|st| Self::rpc_failed(addr, st))?;
        Ok(())
    }

    pub async fn migrate_data(&self, addr: &Address) -> ChordResult<()> {
        if self.is_local(addr) {
            return handlers::migrate_data(&self.state, self).await;
        }
        let mut client = self.connect(addr).await?;
        client
            .migrate_data(Request::new(crate::proto::Empty {}))
            .await
            .map_err(|s| Self::rpc_failed(addr, s))?;
        Ok(())
    }

    pub async fn add_key(&self, addr: &Address, key: String, value: String) -> ChordResult<String> {
        if self.is_local(addr) {
            return Ok(handlers::add_key(&self.state, key, value).to_string());
        }
        let mut client = self.connect(addr).await?;
        let resp = client
            .add_key(Request::new(wire::key_value_request(key, value)))
            .await
            .map_err(|s| Self::rpc_failed(addr, s))?;
        Ok(resp.into_inner().status)
    }

    pub async fn get_key_data(&self, addr: &Address, key: String) -> ChordResult<(u32, Option<String>)> {
        if self.is_local(addr) {
            return Ok(handlers::get_key_data(&self.state, &key));
        }
        let mut client = self.connect(addr).await?;
        let resp = client
            .get_key_data(Request::new(wire::key_request(key)))
            .await
            .map_err(|s| Self::rpc_failed(addr, s))?
            .into_inner();
        Ok((resp.node_id, resp.value))
    }
}
