//! Ties the pieces together into a runnable node: binds a listener,
//! constructs state, and serves the `Chord` service. Replaces the original
//! source's busy-wait startup (`while not self.my_port: pass`) with an
//! explicit oneshot readiness handoff — grounded on the teacher's own
//! `oneshot::channel` usage in `main.rs`/`threads/setup.rs` (design note 4).

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_stream::wrappers::TcpListenerStream;

use crate::error::{ChordError, ChordResult};
use crate::finger::Address;
use crate::id;
use crate::proto::chord_server::ChordServer;
use crate::protocol;
use crate::rpc::RpcHandle;
use crate::service::ChordService;
use crate::state::{NodeState, SharedState};

pub struct Node {
    pub addr: Address,
    pub id: u32,
    pub state: SharedState,
    pub rpc: RpcHandle,
}

impl Node {
    /// Binds `listen` (port `0` for an OS-assigned ephemeral port), derives
    /// this node's identifier from the address it actually bound to, and
    /// returns the constructed `Node` along with the bound listener so the
    /// caller can start serving without racing the bind.
    pub async fn bind(listen: SocketAddr) -> ChordResult<(Self, TcpListener)> {
        let listener = TcpListener::bind(listen)
            .await
            .map_err(|source| ChordError::BindFailed { addr: listen.to_string(), source })?;
        let local_addr = listener.local_addr().expect("bound listener has a local address");
        let addr = local_addr.to_string();
        let self_id = id::id_of_address(&addr);

        let state: SharedState = std::sync::Arc::new(std::sync::Mutex::new(NodeState::new(addr.clone(), self_id)?));
        let rpc = RpcHandle::new(addr.clone(), state.clone());

        Ok((Node { addr, id: self_id, state, rpc }, listener))
    }

    /// Runs `join_network` against a known peer, or forms a new ring when
    /// `known` is `None` (spec.md's sentinel port `0`).
    pub async fn join(&self, known: Option<Address>) -> ChordResult<()> {
        protocol::join_network(&self.state, &self.rpc, known).await
    }

    /// Serves the `Chord` gRPC service on `listener`, signalling readiness
    /// on `ready` once bound (the listener is already bound by `bind`, so
    /// readiness fires immediately, before the server loop is entered).
    pub async fn serve(&self, listener: TcpListener, ready: oneshot::Sender<()>) -> ChordResult<()> {
        let service = ChordService::new(self.state.clone(), self.rpc.clone());
        let incoming = TcpListenerStream::new(listener);

        let _ = ready.send(());

        tonic::transport::Server::builder()
            .add_service(ChordServer::new(service))
            .serve_with_incoming(incoming)
            .await
            .map_err(|source| ChordError::ServeFailed { addr: self.addr.clone(), source })
    }
}
