//! Immutable protocol descriptor.

use crate::key_id::KeyId;
use crate::protocol_id::ProtocolId;
use serde::{Deserialize, Serialize};

/// The immutable record describing one registered NFT protocol.
///
/// A descriptor is constructed once, at registration, and never mutated.
/// The in-memory index entry and the disk-write path share a single
/// `Arc<ProtocolDescriptor>` so both read the same bytes without copying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolDescriptor {
    protocol_id: ProtocolId,
    owner: KeyId,
    metadata: Vec<u8>,
}

impl ProtocolDescriptor {
    /// Creates a new descriptor
    pub fn new(protocol_id: ProtocolId, owner: KeyId, metadata: Vec<u8>) -> Self {
        Self {
            protocol_id,
            owner,
            metadata,
        }
    }

    /// Gets the protocol identifier
    pub fn protocol_id(&self) -> ProtocolId {
        self.protocol_id
    }

    /// Gets the owner key identifier
    pub fn owner(&self) -> KeyId {
        self.owner
    }

    /// Gets the opaque protocol-specific metadata
    pub fn metadata(&self) -> &[u8] {
        &self.metadata
    }
}
