//! The protocol registry.

use crate::entry::ProtocolIndexEntry;
use crate::index::ProtocolIndex;
use crate::pagination::page_window;
use nfp_core::{BlockHash, ChainBlock, KeyId, ProtocolDescriptor, ProtocolId, TxHash};
use nfp_persistence::ProtocolStore;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Read-only snapshot of registry state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Running total of registered protocols
    pub total_protocols: u64,
    /// Entries currently held in the in-memory index
    pub cached_entries: usize,
    /// Height of the last reported chain tip
    pub tip_height: u32,
    /// Hash of the last reported chain tip
    pub tip_block_hash: BlockHash,
}

/// The registry of NFT protocol registrations.
///
/// One coarse mutex guards the index, the counter, the tip state, and the
/// backing store together: uniqueness checks, persistence writes, and
/// counter updates happen as one step as seen from outside. Store access is
/// assumed fast and local, so it stays inside the critical section. The
/// lock is not re-entrant; a caller that blocks inside a visitor callback
/// stalls every other registry user.
///
/// Construct one registry per node with [`ProtocolRegistry::load`] and hand
/// it to consumers by reference.
pub struct ProtocolRegistry {
    inner: Mutex<RegistryInner>,
}

struct RegistryInner {
    index: ProtocolIndex,
    total_count: u64,
    tip_height: u32,
    tip_block_hash: BlockHash,
    store: Box<dyn ProtocolStore>,
}

impl ProtocolRegistry {
    /// Builds the registry over its persistent store, warming the in-memory
    /// index from every persisted entry.
    ///
    /// Entries whose id collides with one already loaded are skipped and
    /// logged. If the persisted counter disagrees with the loaded entry set
    /// the registry adopts the entry count and persists the corrected value,
    /// so a crash between the entry write and the counter write heals here.
    pub fn load(mut store: Box<dyn ProtocolStore>) -> Self {
        let persisted_count = store.read_total_count().unwrap_or_else(|e| {
            warn!("failed to read total protocol count: {}", e);
            0
        });

        let mut index = ProtocolIndex::new();
        let scanned = store.scan_entries(&mut |stored| {
            let id = stored.protocol_id();
            if !index.insert(ProtocolIndexEntry::from(stored)) {
                warn!("skipping duplicate persisted entry for protocol {}", id);
            }
            true
        });
        if let Err(e) = scanned {
            warn!("failed to scan persisted protocol entries: {}", e);
        }

        let mut total_count = persisted_count;
        if total_count != index.len() as u64 {
            warn!(
                "persisted protocol count {} disagrees with {} loaded entries, adopting entry count",
                total_count,
                index.len()
            );
            total_count = index.len() as u64;
            if let Err(e) = store.write_total_count(total_count) {
                error!("failed to persist reconciled protocol count: {}", e);
            }
        }

        info!("protocol registry loaded with {} protocols", total_count);
        Self {
            inner: Mutex::new(RegistryInner {
                index,
                total_count,
                tip_height: 0,
                tip_block_hash: BlockHash::zero(),
                store,
            }),
        }
    }

    /// Registers a protocol observed in the transaction with hash `tx_hash`
    /// inside `block`.
    ///
    /// Returns `false` without touching any state, in memory or persisted,
    /// when the protocol id is already registered. On success the entry is
    /// written through to the store and the persisted counter advances.
    ///
    /// # Panics
    ///
    /// Panics if the descriptor carries the reserved unknown id, an empty
    /// owner, or if `tx_hash` is zero. These are caller bugs, not runtime
    /// conditions.
    pub fn add(
        &self,
        descriptor: ProtocolDescriptor,
        tx_hash: TxHash,
        block: &Arc<ChainBlock>,
    ) -> bool {
        let mut inner = self.inner.lock();
        assert!(
            !descriptor.protocol_id().is_unknown(),
            "add: reserved protocol id"
        );
        assert!(!descriptor.owner().is_zero(), "add: empty protocol owner");
        assert!(!tx_hash.is_zero(), "add: empty registering transaction hash");

        let descriptor = Arc::new(descriptor);
        let entry = ProtocolIndexEntry::new(tx_hash, block, descriptor);
        let id = entry.protocol_id();
        let stored = entry.to_stored();

        // The in-memory insert decides the uniqueness race; a duplicate add
        // never reaches storage.
        if !inner.index.insert(entry) {
            debug!("protocol {} is already registered", id);
            return false;
        }

        if let Err(e) = inner.store.write_entry(&stored) {
            error!("failed to persist protocol {}: {}", id, e);
        }
        inner.total_count += 1;
        let count = inner.total_count;
        if let Err(e) = inner.store.write_total_count(count) {
            error!("failed to persist total protocol count: {}", e);
        }
        debug!("registered protocol {} at height {}", id, stored.block_height);
        true
    }

    /// Checks whether the protocol is registered and visible at the current
    /// tip height.
    ///
    /// # Panics
    ///
    /// Panics if `protocol_id` is the reserved unknown id.
    pub fn contains(&self, protocol_id: ProtocolId) -> bool {
        let mut inner = self.inner.lock();
        assert!(!protocol_id.is_unknown(), "contains: reserved protocol id");
        let tip_height = inner.tip_height;
        inner.contains_at_height(protocol_id, tip_height)
    }

    /// Checks whether the protocol is registered and visible at `height`:
    /// true iff an entry exists with registration height `<= height`.
    ///
    /// # Panics
    ///
    /// Panics if `protocol_id` is the reserved unknown id.
    pub fn contains_at(&self, protocol_id: ProtocolId, height: u32) -> bool {
        let mut inner = self.inner.lock();
        assert!(!protocol_id.is_unknown(), "contains_at: reserved protocol id");
        inner.contains_at_height(protocol_id, height)
    }

    /// Looks up the registration entry for a protocol.
    ///
    /// Consults the in-memory index first and falls back to the persistent
    /// store on a miss, backfilling the cache with what it finds. Returns
    /// `None`, with a warning logged, when the protocol is nowhere.
    ///
    /// # Panics
    ///
    /// Panics if `protocol_id` is the reserved unknown id.
    pub fn lookup(&self, protocol_id: ProtocolId) -> Option<ProtocolIndexEntry> {
        let mut inner = self.inner.lock();
        assert!(!protocol_id.is_unknown(), "lookup: reserved protocol id");
        inner.lookup_entry(protocol_id)
    }

    /// Gets the owner of a registered protocol.
    ///
    /// # Panics
    ///
    /// Panics if `protocol_id` is the reserved unknown id or names a
    /// protocol that is not registered; callers must only ask for ids they
    /// know to exist.
    pub fn owner_of(&self, protocol_id: ProtocolId) -> KeyId {
        let mut inner = self.inner.lock();
        assert!(!protocol_id.is_unknown(), "owner_of: reserved protocol id");
        let entry = inner
            .lookup_entry(protocol_id)
            .unwrap_or_else(|| panic!("owner_of: protocol {} is not registered", protocol_id));
        entry.descriptor().owner()
    }

    /// Retracts a registration, gated by the current tip height.
    ///
    /// # Panics
    ///
    /// Panics if `protocol_id` is the reserved unknown id.
    pub fn delete(&self, protocol_id: ProtocolId) -> bool {
        let mut inner = self.inner.lock();
        assert!(!protocol_id.is_unknown(), "delete: reserved protocol id");
        let tip_height = inner.tip_height;
        inner.delete_at_height(protocol_id, tip_height)
    }

    /// Retracts a registration, but only if its height is `<= height` —
    /// a registration may only be retracted once it is confirmed as of the
    /// height the caller is retracting at. Returns `false` with no side
    /// effects otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `protocol_id` is the reserved unknown id.
    pub fn delete_at(&self, protocol_id: ProtocolId, height: u32) -> bool {
        let mut inner = self.inner.lock();
        assert!(!protocol_id.is_unknown(), "delete_at: reserved protocol id");
        inner.delete_at_height(protocol_id, height)
    }

    /// Reports a newly connected chain tip.
    ///
    /// This is the only way tip state changes; the registry never infers
    /// the tip from insertions.
    pub fn update_block_tip(&self, block: &Arc<ChainBlock>) {
        let mut inner = self.inner.lock();
        inner.tip_height = block.height();
        inner.tip_block_hash = block.hash();
        debug!("block tip updated to height {}", block.height());
    }

    /// Visits every entry in ascending protocol-id order.
    ///
    /// A `false` return from the visitor is logged as a soft failure;
    /// iteration always covers the remaining entries.
    pub fn process_full_range<F>(&self, mut visitor: F)
    where
        F: FnMut(&ProtocolIndexEntry) -> bool,
    {
        let inner = self.inner.lock();
        for entry in inner.index.iter() {
            if !visitor(entry) {
                warn!("visitor failed for protocol {}", entry.protocol_id());
            }
        }
    }

    /// Visits one page of the entries registered at or below `height`, in
    /// ascending height order.
    ///
    /// Pages are anchored at the recent end: the page holds up to `count`
    /// entries, skipping the `start_from` most recently registered ones.
    /// Same soft-failure semantics as [`Self::process_full_range`].
    pub fn process_page_by_height<F>(&self, mut visitor: F, height: u32, count: usize, start_from: usize)
    where
        F: FnMut(&ProtocolIndexEntry) -> bool,
    {
        let inner = self.inner.lock();
        let len = inner.index.range_by_height(height).count();
        let Some(window) = page_window(len, start_from, count) else {
            return;
        };
        for entry in inner
            .index
            .range_by_height(height)
            .skip(window.start)
            .take(window.len())
        {
            if !visitor(entry) {
                warn!("visitor failed for protocol {}", entry.protocol_id());
            }
        }
    }

    /// Running total of registered protocols
    pub fn total_count(&self) -> u64 {
        self.inner.lock().total_count
    }

    /// Height of the last reported chain tip
    pub fn tip_height(&self) -> u32 {
        self.inner.lock().tip_height
    }

    /// Snapshot of registry state
    pub fn stats(&self) -> RegistryStats {
        let inner = self.inner.lock();
        RegistryStats {
            total_protocols: inner.total_count,
            cached_entries: inner.index.len(),
            tip_height: inner.tip_height,
            tip_block_hash: inner.tip_block_hash,
        }
    }
}

// Inner helpers take `&mut RegistryInner` so no operation re-locks the
// non-reentrant mutex.
impl RegistryInner {
    fn contains_at_height(&mut self, protocol_id: ProtocolId, height: u32) -> bool {
        match self.lookup_entry(protocol_id) {
            Some(entry) => entry.height() <= height,
            None => false,
        }
    }

    fn lookup_entry(&mut self, protocol_id: ProtocolId) -> Option<ProtocolIndexEntry> {
        if let Some(entry) = self.index.get(protocol_id) {
            return Some(entry.clone());
        }
        match self.store.read_entry(protocol_id) {
            Ok(Some(stored)) => {
                let entry = ProtocolIndexEntry::from(stored);
                // The lock excludes concurrent mutation, so the backfill
                // cannot collide with the miss observed above.
                let inserted = self.index.insert(entry.clone());
                assert!(inserted, "lookup backfill collided with a cached entry");
                Some(entry)
            }
            Ok(None) => {
                warn!("protocol {} not found in storage", protocol_id);
                None
            }
            Err(e) => {
                warn!("failed to read protocol {} from storage: {}", protocol_id, e);
                None
            }
        }
    }

    fn delete_at_height(&mut self, protocol_id: ProtocolId, height: u32) -> bool {
        let confirmed = self
            .index
            .get(protocol_id)
            .map_or(false, |entry| entry.height() <= height);
        if !confirmed {
            return false;
        }

        self.index.remove(protocol_id);
        if let Err(e) = self.store.erase_entry(protocol_id) {
            error!("failed to erase protocol {} from storage: {}", protocol_id, e);
        }
        self.total_count = self.total_count.saturating_sub(1);
        let count = self.total_count;
        if let Err(e) = self.store.write_total_count(count) {
            error!("failed to persist total protocol count: {}", e);
        }
        debug!("retracted protocol {}", protocol_id);
        true
    }
}
