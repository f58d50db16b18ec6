//! `chord-query`: issues a single `query` RPC against a known node and
//! prints the result, grounded on `original_source/chord_query.py`.

use clap::Parser;
use log::LevelFilter;

use chord::cli::QueryArgs;
use chord::proto::chord_client::ChordClient;
use chord::proto::KeyRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = QueryArgs::parse();
    simple_logger::SimpleLogger::new().env().with_level(LevelFilter::Info).init().ok();

    let mut client = match ChordClient::connect(format!("http://{}", args.peer_addr)).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("failed to connect to {}: {e}", args.peer_addr);
            std::process::exit(6);
        }
    };

    println!("searching data with key '{}' from known node {}...", args.search_key, args.peer_addr);
    match client.query(KeyRequest { key: args.search_key.clone() }).await {
        Ok(resp) => {
            let resp = resp.into_inner();
            println!("response from successor(node {}): {}", resp.node_id, resp.value);
        }
        Err(status) => {
            eprintln!("Error: {status}");
            std::process::exit(6);
        }
    }
    Ok(())
}
