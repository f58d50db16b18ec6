//! `chord-populate`: reads a comma-separated table with a header row and
//! issues `populate` RPCs against a known node, grounded on
//! `original_source/chord_populate.py`. Key is `row[0] + row[3]`, value is
//! the whole row re-joined (spec.md section 6).

use clap::Parser;
use log::{info, warn, LevelFilter};

use chord::cli::PopulateArgs;
use chord::proto::chord_client::ChordClient;
use chord::proto::KeyValueRequest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = PopulateArgs::parse();
    simple_logger::SimpleLogger::new().env().with_level(LevelFilter::Info).init().ok();

    let mut client = match ChordClient::connect(format!("http://{}", args.peer_addr)).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("failed to connect to {}: {e}", args.peer_addr);
            std::process::exit(123);
        }
    };

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(&args.file_path)?;
    let mut added = 0usize;
    for record in reader.records() {
        let record = record?;
        let fields: Vec<&str> = record.iter().collect();
        if fields.len() < 4 {
            warn!("skipping malformed row (need at least 4 columns): {:?}", fields);
            continue;
        }
        let key = format!("{}{}", fields[0], fields[3]);
        let value = fields.join(",");

        info!("sending ({key}) to {}", args.peer_addr);
        match client
            .populate(KeyValueRequest { key: key.clone(), value })
            .await
        {
            Ok(resp) if resp.into_inner().status == "Added" => {
                added += 1;
            }
            Ok(_) => warn!("unexpected response populating key {key}"),
            Err(status) => warn!("populate({key}) failed: {status}"),
        }
    }
    info!("populated {added} rows from {}", args.file_path);
    Ok(())
}
