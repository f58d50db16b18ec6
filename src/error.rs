use thiserror::Error;

/// Error taxonomy for the Chord node, grounded on
/// `examples/FedericoCeratto-chord-dht/src/core/error.rs`'s `DhtError`:
/// transport failures and protocol violations are typed and propagated
/// instead of collapsing to a `null` the caller forgets to check
/// (spec.md design note 5).
#[derive(Error, Debug)]
pub enum ChordError {
    #[error("node {addr} unreachable: {source}")]
    Unreachable {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("rpc to {addr} failed: {status}")]
    RpcFailed { addr: String, status: tonic::Status },

    #[error("failed to bind listener on {addr}: {source}")]
    BindFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("gRPC server on {addr} terminated: {source}")]
    ServeFailed {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("invalid finger index {0}, must be in 1..=M")]
    InvalidFingerIndex(u32),

    #[error("id {0} out of range for this ring")]
    IdOutOfRange(u32),

    #[error("find_predecessor exceeded {hops} hops looking for id {id}")]
    RoutingLoopExceeded { id: u32, hops: usize },
}

pub type ChordResult<T> = Result<T, ChordError>;
