//! Content digests used in record identifiers.

use std::fmt;
use xxhash_rust::xxh3::xxh3_128;

/// 128-bit XXH3 digest of a node's rendered text.
///
/// Stable across runs and platforms, so re-indexing unchanged content yields the
/// same record ids.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ContentDigest(u128);

impl ContentDigest {
    pub fn of(text: &str) -> Self {
        Self(xxh3_128(text.as_bytes()))
    }

    /// Returns the digest as 32 lowercase hexadecimal characters.
    pub fn as_hex(&self) -> String {
        format!("{:032x}", self.0)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}
