//! Identifier derivation: `id(x) = SHA1(x) mod NODES`, using the low `M` bits
//! of the big-endian SHA-1 digest (spec.md section 3), grounded on the
//! original source's `get_node_id`/`populate`/`query` encoding.

use sha1::{Digest, Sha1};

use crate::constants::NODES;

/// Hashes arbitrary bytes onto the ring. Only the low `M` bits of the
/// big-endian digest matter, so only the last 4 bytes of the 20-byte SHA-1
/// output need to be consulted for any `M <= 32`.
pub fn hash_to_id(bytes: &[u8]) -> u32 {
    let digest = Sha1::digest(bytes);
    let tail = &digest[digest.len() - 4..];
    let value = u32::from_be_bytes(tail.try_into().expect("4-byte slice"));
    value & (NODES - 1)
}

/// A node's identifier is the hash of its address (`host:port`), the
/// canonical bytes being the address string itself.
pub fn id_of_address(addr: &str) -> u32 {
    hash_to_id(addr.as_bytes())
}

/// A key's identifier on the ring.
pub fn id_of_key(key: &str) -> u32 {
    hash_to_id(key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_bounded_by_nodes() {
        for addr in ["127.0.0.1:43544", "127.0.0.1:1", "", "foo"] {
            assert!(id_of_address(addr) < NODES);
        }
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(id_of_address("127.0.0.1:9000"), id_of_address("127.0.0.1:9000"));
        assert_eq!(id_of_key("some-key"), id_of_key("some-key"));
    }
}
