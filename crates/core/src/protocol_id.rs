//! Protocol identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a registered NFT protocol.
///
/// The raw value `0` is reserved as the unknown/invalid identifier and is
/// never stored or queried; registry operations assert against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProtocolId(u64);

impl ProtocolId {
    /// The reserved unknown/invalid identifier
    pub const UNKNOWN: ProtocolId = ProtocolId(0);

    /// Creates a protocol identifier from its raw value
    pub const fn new(raw: u64) -> Self {
        ProtocolId(raw)
    }

    /// Gets the raw 64-bit value
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Checks whether this is the reserved unknown identifier
    pub const fn is_unknown(&self) -> bool {
        self.0 == 0
    }

    /// Big-endian byte representation, used for ordered storage keys
    pub const fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Reconstructs an identifier from its big-endian byte representation
    pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
        ProtocolId(u64::from_be_bytes(bytes))
    }
}

impl From<u64> for ProtocolId {
    fn from(raw: u64) -> Self {
        ProtocolId(raw)
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_is_zero() {
        assert!(ProtocolId::UNKNOWN.is_unknown());
        assert!(ProtocolId::new(0).is_unknown());
        assert!(!ProtocolId::new(1).is_unknown());
    }

    #[test]
    fn test_be_bytes_round_trip() {
        let id = ProtocolId::new(0x0102_0304_0506_0708);
        assert_eq!(ProtocolId::from_be_bytes(id.to_be_bytes()), id);
    }

    #[test]
    fn test_be_bytes_preserve_ordering() {
        // Big-endian keys must sort the same way the raw values do.
        let low = ProtocolId::new(41);
        let high = ProtocolId::new(42);
        assert!(low.to_be_bytes() < high.to_be_bytes());
    }
}
