//! In-memory store backend.
//!
//! Keeps the full key/codec path of the disk backends over a plain ordered
//! map. Used by tests and by deployments that do not need durability.
//! `Clone` shares the underlying map, which is how tests model a process
//! restart over the same durable state.

use crate::keys::{self, ENTRY_KEY_PREFIX, TOTAL_COUNT_KEY};
use crate::serialization;
use crate::store::{ProtocolStore, StoredProtocolEntry};
use crate::Result;
use nfp_core::ProtocolId;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// In-memory protocol store
#[derive(Debug, Clone, Default)]
pub struct MemoryProtocolStore {
    data: Arc<Mutex<BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryProtocolStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held, counter key included
    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    /// Checks whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }
}

impl ProtocolStore for MemoryProtocolStore {
    fn read_total_count(&self) -> Result<u64> {
        match self.data.lock().get(TOTAL_COUNT_KEY) {
            Some(bytes) => serialization::decode_count(bytes),
            None => Ok(0),
        }
    }

    fn write_total_count(&mut self, count: u64) -> Result<()> {
        let bytes = serialization::encode_count(count)?;
        self.data.lock().insert(TOTAL_COUNT_KEY.to_vec(), bytes);
        Ok(())
    }

    fn scan_entries(&self, visit: &mut dyn FnMut(StoredProtocolEntry) -> bool) -> Result<()> {
        let data = self.data.lock();
        for (key, value) in data.range(ENTRY_KEY_PREFIX.to_vec()..) {
            if !key.starts_with(ENTRY_KEY_PREFIX) {
                break;
            }
            let entry = match serialization::decode_entry(value) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping undecodable protocol record {}: {}", hex::encode(key), e);
                    continue;
                }
            };
            if !visit(entry) {
                break;
            }
        }
        Ok(())
    }

    fn write_entry(&mut self, entry: &StoredProtocolEntry) -> Result<()> {
        let bytes = serialization::encode_entry(entry)?;
        self.data
            .lock()
            .insert(keys::entry_key(entry.protocol_id()), bytes);
        Ok(())
    }

    fn erase_entry(&mut self, protocol_id: ProtocolId) -> Result<()> {
        self.data.lock().remove(&keys::entry_key(protocol_id));
        Ok(())
    }

    fn read_entry(&self, protocol_id: ProtocolId) -> Result<Option<StoredProtocolEntry>> {
        match self.data.lock().get(&keys::entry_key(protocol_id)) {
            Some(bytes) => Ok(Some(serialization::decode_entry(bytes)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nfp_core::{Hash256, KeyId, ProtocolDescriptor};

    fn sample_entry(id: u64, height: u32) -> StoredProtocolEntry {
        StoredProtocolEntry {
            block_hash: Hash256::from([height as u8; 32]),
            block_height: height,
            tx_hash: Hash256::from([id as u8; 32]),
            descriptor: Arc::new(ProtocolDescriptor::new(
                ProtocolId::new(id),
                KeyId::from([1u8; 20]),
                Vec::new(),
            )),
        }
    }

    #[test]
    fn test_write_read_erase() {
        let mut store = MemoryProtocolStore::new();
        let entry = sample_entry(5, 10);

        store.write_entry(&entry).unwrap();
        let read = store.read_entry(ProtocolId::new(5)).unwrap().unwrap();
        assert_eq!(read.block_height, 10);
        assert_eq!(read.protocol_id(), ProtocolId::new(5));

        store.erase_entry(ProtocolId::new(5)).unwrap();
        assert!(store.read_entry(ProtocolId::new(5)).unwrap().is_none());
    }

    #[test]
    fn test_total_count_defaults_to_zero() {
        let mut store = MemoryProtocolStore::new();
        assert_eq!(store.read_total_count().unwrap(), 0);

        store.write_total_count(9).unwrap();
        assert_eq!(store.read_total_count().unwrap(), 9);
    }

    #[test]
    fn test_scan_visits_all_entries_in_id_order() {
        let mut store = MemoryProtocolStore::new();
        for id in [30u64, 10, 20] {
            store.write_entry(&sample_entry(id, id as u32)).unwrap();
        }
        store.write_total_count(3).unwrap();

        let mut seen = Vec::new();
        store
            .scan_entries(&mut |entry| {
                seen.push(entry.protocol_id().raw());
                true
            })
            .unwrap();
        assert_eq!(seen, vec![10, 20, 30]);
    }

    #[test]
    fn test_scan_stops_when_callback_returns_false() {
        let mut store = MemoryProtocolStore::new();
        for id in 1..=4u64 {
            store.write_entry(&sample_entry(id, id as u32)).unwrap();
        }

        let mut visited = 0;
        store
            .scan_entries(&mut |_| {
                visited += 1;
                visited < 2
            })
            .unwrap();
        assert_eq!(visited, 2);
    }

    #[test]
    fn test_clone_shares_state() {
        let mut store = MemoryProtocolStore::new();
        let restarted = store.clone();

        store.write_entry(&sample_entry(7, 3)).unwrap();
        assert!(restarted.read_entry(ProtocolId::new(7)).unwrap().is_some());
    }
}
