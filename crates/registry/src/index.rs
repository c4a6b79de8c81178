//! Multi-key in-memory index.
//!
//! Two synchronized ordered views over one entry set: a unique primary view
//! keyed by protocol id and a non-unique secondary view ordered by
//! registration height. Insert and erase keep the views in lockstep; no
//! entry ever exists in one without the other. Ordering among entries at
//! equal height follows insertion order and is not part of the contract.

use crate::entry::ProtocolIndexEntry;
use nfp_core::ProtocolId;
use std::collections::BTreeMap;

/// Secondary key: registration height, tie-broken by insertion sequence
type HeightKey = (u32, u64);

#[derive(Debug)]
struct IndexedEntry {
    entry: ProtocolIndexEntry,
    seq: u64,
}

/// The registry's in-memory index
#[derive(Debug, Default)]
pub(crate) struct ProtocolIndex {
    by_id: BTreeMap<ProtocolId, IndexedEntry>,
    by_height: BTreeMap<HeightKey, ProtocolId>,
    next_seq: u64,
}

impl ProtocolIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of entries held
    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Inserts an entry, rejecting a duplicate protocol id.
    ///
    /// On rejection neither view is touched.
    pub(crate) fn insert(&mut self, entry: ProtocolIndexEntry) -> bool {
        let id = entry.protocol_id();
        if self.by_id.contains_key(&id) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_height.insert((entry.block_height(), seq), id);
        self.by_id.insert(id, IndexedEntry { entry, seq });
        true
    }

    /// Removes the entry with the given id, keeping both views in lockstep
    pub(crate) fn remove(&mut self, id: ProtocolId) -> Option<ProtocolIndexEntry> {
        let indexed = self.by_id.remove(&id)?;
        self.by_height.remove(&(indexed.entry.block_height(), indexed.seq));
        Some(indexed.entry)
    }

    /// Looks up an entry by protocol id
    pub(crate) fn get(&self, id: ProtocolId) -> Option<&ProtocolIndexEntry> {
        self.by_id.get(&id).map(|indexed| &indexed.entry)
    }

    /// Iterates every entry in ascending protocol-id order
    pub(crate) fn iter(&self) -> impl Iterator<Item = &ProtocolIndexEntry> {
        self.by_id.values().map(|indexed| &indexed.entry)
    }

    /// Iterates entries with recorded height `<= max_height` in ascending
    /// height order
    pub(crate) fn range_by_height(
        &self,
        max_height: u32,
    ) -> impl Iterator<Item = &ProtocolIndexEntry> + Clone + '_ {
        self.by_height.range(..=(max_height, u64::MAX)).map(|(_, id)| {
            &self
                .by_id
                .get(id)
                .expect("height view references an entry missing from the primary view")
                .entry
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfp_core::{ChainBlock, Hash256, KeyId, ProtocolDescriptor};
    use std::sync::Arc;

    fn entry(id: u64, height: u32) -> ProtocolIndexEntry {
        let block = Arc::new(ChainBlock::new(height, Hash256::from([height as u8; 32])));
        ProtocolIndexEntry::new(
            Hash256::from([id as u8; 32]),
            &block,
            Arc::new(ProtocolDescriptor::new(
                ProtocolId::new(id),
                KeyId::from([1u8; 20]),
                Vec::new(),
            )),
        )
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut index = ProtocolIndex::new();
        assert!(index.insert(entry(1, 10)));
        assert!(!index.insert(entry(1, 20)));

        assert_eq!(index.len(), 1);
        // The first registration is untouched by the rejected insert.
        assert_eq!(index.get(ProtocolId::new(1)).unwrap().block_height(), 10);
        assert_eq!(index.range_by_height(u32::MAX).count(), 1);
    }

    #[test]
    fn test_remove_keeps_views_in_lockstep() {
        let mut index = ProtocolIndex::new();
        index.insert(entry(1, 10));
        index.insert(entry(2, 20));

        let removed = index.remove(ProtocolId::new(1)).unwrap();
        assert_eq!(removed.protocol_id(), ProtocolId::new(1));
        assert!(index.get(ProtocolId::new(1)).is_none());
        assert_eq!(index.range_by_height(u32::MAX).count(), 1);
        assert!(index.remove(ProtocolId::new(1)).is_none());
    }

    #[test]
    fn test_range_by_height_filters_and_orders() {
        let mut index = ProtocolIndex::new();
        for (id, height) in [(1u64, 30u32), (2, 10), (3, 20), (4, 40)] {
            index.insert(entry(id, height));
        }

        let heights: Vec<u32> = index
            .range_by_height(30)
            .map(|e| e.block_height())
            .collect();
        assert_eq!(heights, vec![10, 20, 30]);

        assert_eq!(index.range_by_height(9).count(), 0);
    }

    #[test]
    fn test_range_allows_equal_heights() {
        let mut index = ProtocolIndex::new();
        index.insert(entry(1, 10));
        index.insert(entry(2, 10));
        index.insert(entry(3, 10));

        assert_eq!(index.range_by_height(10).count(), 3);
    }

    #[test]
    fn test_iter_is_ordered_by_id() {
        let mut index = ProtocolIndex::new();
        for id in [9u64, 3, 6] {
            index.insert(entry(id, 1));
        }
        let ids: Vec<u64> = index.iter().map(|e| e.protocol_id().raw()).collect();
        assert_eq!(ids, vec![3, 6, 9]);
    }
}
