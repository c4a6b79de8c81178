//! Store contract and record types.

use crate::Result;
use nfp_core::{BlockHash, ProtocolDescriptor, ProtocolId, TxHash};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The record a store persists for one protocol registration.
///
/// The descriptor is held behind an `Arc`: the registry's in-memory entry
/// and the write path share the same descriptor bytes, and the codec
/// serializes through the pointer without first copying the value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProtocolEntry {
    /// Hash of the block containing the registration
    pub block_hash: BlockHash,
    /// Height of the block containing the registration
    pub block_height: u32,
    /// Hash of the registering transaction
    pub tx_hash: TxHash,
    /// The registered protocol descriptor
    pub descriptor: Arc<ProtocolDescriptor>,
}

impl StoredProtocolEntry {
    /// Gets the protocol identifier of this record
    pub fn protocol_id(&self) -> ProtocolId {
        self.descriptor.protocol_id()
    }
}

/// Contract between the registry core and its persistent backing store.
///
/// Backends surface real failures through `Result`; the registry flattens
/// every error into "not found, logged" at its own boundary, so a store
/// implementation never needs to hide problems.
pub trait ProtocolStore: Send {
    /// Reads the persisted total protocol counter; an absent key reads as 0
    fn read_total_count(&self) -> Result<u64>;

    /// Persists the total protocol counter
    fn write_total_count(&mut self, count: u64) -> Result<()>;

    /// Streams every persisted entry to `visit`.
    ///
    /// A `false` return from the callback stops the scan. Records that fail
    /// to decode are logged and skipped; they do not abort the scan.
    fn scan_entries(&self, visit: &mut dyn FnMut(StoredProtocolEntry) -> bool) -> Result<()>;

    /// Persists one registration record
    fn write_entry(&mut self, entry: &StoredProtocolEntry) -> Result<()>;

    /// Erases the record for the given protocol, if present
    fn erase_entry(&mut self, protocol_id: ProtocolId) -> Result<()>;

    /// Reads the record for the given protocol
    fn read_entry(&self, protocol_id: ProtocolId) -> Result<Option<StoredProtocolEntry>>;
}
