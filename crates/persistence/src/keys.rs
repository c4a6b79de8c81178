//! Storage key layout.
//!
//! All registry data lives in one keyspace, separated by byte prefixes.
//! Entry keys carry the protocol id big-endian so a prefix scan streams
//! entries in ascending id order.

use nfp_core::ProtocolId;

/// Prefix for per-protocol entry records
pub const ENTRY_KEY_PREFIX: &[u8] = b"NFP_Proto";

/// Key of the persisted total protocol counter
pub const TOTAL_COUNT_KEY: &[u8] = b"NFP_TotalCount";

/// Builds the storage key for a protocol entry
pub fn entry_key(protocol_id: ProtocolId) -> Vec<u8> {
    let mut key = Vec::with_capacity(ENTRY_KEY_PREFIX.len() + 8);
    key.extend_from_slice(ENTRY_KEY_PREFIX);
    key.extend_from_slice(&protocol_id.to_be_bytes());
    key
}

/// Recovers the protocol id from an entry key, if the key has entry shape
pub fn entry_key_id(key: &[u8]) -> Option<ProtocolId> {
    let suffix = key.strip_prefix(ENTRY_KEY_PREFIX)?;
    let bytes: [u8; 8] = suffix.try_into().ok()?;
    Some(ProtocolId::from_be_bytes(bytes))
}
