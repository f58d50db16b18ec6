//! `clap`-derived CLI surfaces for the three binaries (spec.md section 6),
//! grounded on the teacher's `Cli::parse()` call site in `main.rs` (the
//! derive struct itself isn't present in the retrieved pack, so it's
//! reconstructed here in the same idiom).

use clap::Parser;

/// Starts a Chord node, forming a new ring or joining one via `--peer`.
#[derive(Parser, Debug)]
#[command(name = "chord-node")]
pub struct NodeArgs {
    /// Address to listen on. Port `0` picks an OS-assigned ephemeral port.
    #[arg(long, default_value = "127.0.0.1:0")]
    pub listen: String,

    /// Address of a known ring member to join through. Omit to form a new
    /// ring (this crate's equivalent of the original source's sentinel
    /// port `0`).
    #[arg(long)]
    pub peer: Option<String>,
}

/// Populates a running ring from a CSV-like file.
#[derive(Parser, Debug)]
#[command(name = "chord-populate")]
pub struct PopulateArgs {
    /// Address of any known node in the ring.
    pub peer_addr: String,

    /// Path to a comma-separated table with a header row; key is
    /// `row[0] + row[3]`, value is the whole row.
    pub file_path: String,
}

/// Queries a running ring for a single key.
#[derive(Parser, Debug)]
#[command(name = "chord-query")]
pub struct QueryArgs {
    /// Address of any known node in the ring.
    pub peer_addr: String,

    /// Key to search for.
    pub search_key: String,
}
