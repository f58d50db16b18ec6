//! Ring-wide tuning constants, grounded on the original source's module-level
//! globals (`M`, `NODES`, `BUF_SZ`, `BACKLOG`, `TEST_BASE`).

/// Identifier bit-width. Kept small for testability, matching the original
/// source's comment that production use would set this to
/// `hashlib.sha1().digest_size * 8` (160).
pub const M: u32 = 7;

/// Ring size, `2^M`.
pub const NODES: u32 = 1 << M;

/// Listen backlog. Unused directly once the transport is tonic/HTTP2 (which
/// manages its own accept queue), kept for parity with spec.md's external
/// interface table.
pub const BACKLOG: u32 = 100;

/// Receive buffer size. Unused at the protobuf/HTTP2 layer, kept for parity
/// with spec.md.
pub const BUF_SZ: usize = 4096;

/// Base port for test harnesses; individual tests offset from here to avoid
/// colliding when run in parallel.
pub const TEST_BASE: u16 = 43544;
