//! 256-bit hash type for block and transaction hashes.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size of a hash in bytes
pub const HASH_SIZE: usize = 32;

/// A 256-bit hash value.
///
/// The registry receives these fully formed from the chain layer; it never
/// computes hashes itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hash256([u8; HASH_SIZE]);

/// Hash of a block
pub type BlockHash = Hash256;

/// Hash of a transaction
pub type TxHash = Hash256;

impl Hash256 {
    /// The all-zero hash, used as the "no hash" sentinel
    pub const fn zero() -> Self {
        Hash256([0u8; HASH_SIZE])
    }

    /// Checks whether this is the all-zero hash
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Creates a hash from a byte slice.
    ///
    /// Returns [`CoreError::InvalidLength`] if the slice is not exactly
    /// [`HASH_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != HASH_SIZE {
            return Err(CoreError::InvalidLength {
                expected: HASH_SIZE,
                actual: bytes.len(),
            });
        }
        let mut data = [0u8; HASH_SIZE];
        data.copy_from_slice(bytes);
        Ok(Hash256(data))
    }

    /// Gets the hash as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Default for Hash256 {
    fn default() -> Self {
        Hash256::zero()
    }
}

impl From<[u8; HASH_SIZE]> for Hash256 {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Hash256(bytes)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Hash256 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Hash256::from_bytes(&bytes)
    }
}
