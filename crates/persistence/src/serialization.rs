//! Entry and counter codec.
//!
//! Records are bincode-encoded. The codec is shared by every backend so the
//! on-disk format does not depend on the storage engine.

use crate::store::StoredProtocolEntry;
use crate::Result;

/// Encodes a registration record
pub fn encode_entry(entry: &StoredProtocolEntry) -> Result<Vec<u8>> {
    Ok(bincode::serialize(entry)?)
}

/// Decodes a registration record
pub fn decode_entry(bytes: &[u8]) -> Result<StoredProtocolEntry> {
    Ok(bincode::deserialize(bytes)?)
}

/// Encodes the total protocol counter
pub fn encode_count(count: u64) -> Result<Vec<u8>> {
    Ok(bincode::serialize(&count)?)
}

/// Decodes the total protocol counter
pub fn decode_count(bytes: &[u8]) -> Result<u64> {
    Ok(bincode::deserialize(bytes)?)
}
