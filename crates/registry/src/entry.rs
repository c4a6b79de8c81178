//! Registration index entry.

use nfp_core::{BlockHash, ChainBlock, ProtocolDescriptor, ProtocolId, TxHash};
use nfp_persistence::StoredProtocolEntry;
use std::sync::{Arc, Weak};

/// The registry's record of when and how one protocol was registered.
///
/// Entries added live hold a weak reference into the chain's block index;
/// the chain owns those nodes and the registry never keeps one alive.
/// Entries rehydrated from storage carry no chain reference and report the
/// height recorded at registration.
#[derive(Debug, Clone)]
pub struct ProtocolIndexEntry {
    protocol_id: ProtocolId,
    tx_hash: TxHash,
    block_height: u32,
    block_hash: BlockHash,
    chain: Option<Weak<ChainBlock>>,
    descriptor: Arc<ProtocolDescriptor>,
}

impl ProtocolIndexEntry {
    /// Creates the entry for a live registration observed on `block`
    pub fn new(tx_hash: TxHash, block: &Arc<ChainBlock>, descriptor: Arc<ProtocolDescriptor>) -> Self {
        Self {
            protocol_id: descriptor.protocol_id(),
            tx_hash,
            block_height: block.height(),
            block_hash: block.hash(),
            chain: Some(Arc::downgrade(block)),
            descriptor,
        }
    }

    /// Gets the protocol identifier
    pub fn protocol_id(&self) -> ProtocolId {
        self.protocol_id
    }

    /// Gets the hash of the registering transaction
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Gets the hash of the block containing the registration
    pub fn block_hash(&self) -> BlockHash {
        self.block_hash
    }

    /// Height recorded at registration time
    pub fn block_height(&self) -> u32 {
        self.block_height
    }

    /// Current height of the registration.
    ///
    /// Re-derived from the chain's block index node when the reference is
    /// still alive, the recorded height otherwise.
    pub fn height(&self) -> u32 {
        match self.chain_block() {
            Some(block) => block.height(),
            None => self.block_height,
        }
    }

    /// Re-resolves the chain block this entry was registered in, if the
    /// chain still holds it
    pub fn chain_block(&self) -> Option<Arc<ChainBlock>> {
        self.chain.as_ref().and_then(Weak::upgrade)
    }

    /// Gets the shared protocol descriptor
    pub fn descriptor(&self) -> &Arc<ProtocolDescriptor> {
        &self.descriptor
    }

    /// Builds the record the persistent store keeps for this entry.
    ///
    /// The descriptor is shared, not copied.
    pub fn to_stored(&self) -> StoredProtocolEntry {
        StoredProtocolEntry {
            block_hash: self.block_hash,
            block_height: self.block_height,
            tx_hash: self.tx_hash,
            descriptor: Arc::clone(&self.descriptor),
        }
    }
}

impl From<StoredProtocolEntry> for ProtocolIndexEntry {
    fn from(stored: StoredProtocolEntry) -> Self {
        Self {
            protocol_id: stored.protocol_id(),
            tx_hash: stored.tx_hash,
            block_height: stored.block_height,
            block_hash: stored.block_hash,
            chain: None,
            descriptor: stored.descriptor,
        }
    }
}
