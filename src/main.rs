//! `chord-node`: starts a node, either forming a new ring or joining one
//! through `--peer`, then serves the `Chord` RPC surface until killed.
//! Logging setup mirrors the teacher's `main.rs`
//! (`simple_logger::SimpleLogger::new().env().with_level(...).init()`).

use clap::Parser;
use log::{info, LevelFilter};
use tokio::sync::oneshot;

use chord::cli::NodeArgs;
use chord::node::Node;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = NodeArgs::parse();
    simple_logger::SimpleLogger::new()
        .env()
        .with_level(LevelFilter::Info)
        .init()
        .expect("logger already initialized");

    let listen_addr: std::net::SocketAddr = match args.listen.parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("invalid --listen address '{}': {e}", args.listen);
            std::process::exit(1);
        }
    };

    let (node, listener) = Node::bind(listen_addr).await?;
    info!("node {} listening on {}", node.id, node.addr);

    match &args.peer {
        Some(peer) => info!("joining ring via known node {peer}"),
        None => info!("forming a new ring"),
    }
    node.join(args.peer.clone()).await?;
    info!("join complete, node {} is steady", node.id);

    let (ready_tx, ready_rx) = oneshot::channel();
    let serve_handle = tokio::spawn(async move { node.serve(listener, ready_tx).await });
    ready_rx.await.ok();
    info!("gRPC service ready");

    serve_handle.await??;
    Ok(())
}
