//! Registry round-trip over the RocksDB backend: everything written by one
//! registry instance must be recoverable by a fresh instance over the same
//! database, as after a process restart.

use nfp_core::{ChainBlock, Hash256, KeyId, ProtocolDescriptor, ProtocolId};
use nfp_persistence::{RocksDbConfig, RocksDbProtocolStore};
use nfp_registry::ProtocolRegistry;
use std::sync::Arc;
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> Box<RocksDbProtocolStore> {
    let config = RocksDbConfig {
        path: dir.path().to_path_buf(),
        ..Default::default()
    };
    Box::new(RocksDbProtocolStore::open(&config).unwrap())
}

fn descriptor(id: u64, owner_byte: u8) -> ProtocolDescriptor {
    ProtocolDescriptor::new(
        ProtocolId::new(id),
        KeyId::from([owner_byte; 20]),
        format!("protocol-{id}").into_bytes(),
    )
}

fn block(height: u32) -> Arc<ChainBlock> {
    Arc::new(ChainBlock::new(height, Hash256::from([height as u8; 32])))
}

#[test]
fn registry_state_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let registry = ProtocolRegistry::load(open_store(&dir));
        registry.update_block_tip(&block(100));
        for id in 1..=5u64 {
            assert!(registry.add(
                descriptor(id, id as u8),
                Hash256::from([id as u8; 32]),
                &block(id as u32 * 10),
            ));
        }
        assert!(registry.delete(ProtocolId::new(3)));
        assert_eq!(registry.total_count(), 4);
    }

    let restarted = ProtocolRegistry::load(open_store(&dir));
    assert_eq!(restarted.total_count(), 4);
    assert_eq!(restarted.stats().cached_entries, 4);

    // Deleted registrations stay deleted.
    assert!(restarted.lookup(ProtocolId::new(3)).is_none());

    // Recovered entries keep their identity, owner, height, and hashes.
    let entry = restarted.lookup(ProtocolId::new(2)).unwrap();
    assert_eq!(entry.protocol_id(), ProtocolId::new(2));
    assert_eq!(entry.descriptor().owner(), KeyId::from([2u8; 20]));
    assert_eq!(entry.block_height(), 20);
    assert_eq!(entry.block_hash(), Hash256::from([20u8; 32]));
    assert_eq!(entry.tx_hash(), Hash256::from([2u8; 32]));

    // Height-qualified queries work against recovered state.
    assert!(restarted.contains_at(ProtocolId::new(5), 50));
    assert!(!restarted.contains_at(ProtocolId::new(5), 49));

    // Pagination over recovered state: heights are [10, 20, 40, 50].
    let mut heights = Vec::new();
    restarted.process_page_by_height(
        |entry| {
            heights.push(entry.block_height());
            true
        },
        50,
        2,
        0,
    );
    assert_eq!(heights, vec![40, 50]);
}

#[test]
fn lazy_lookup_backfills_after_restart() {
    let dir = TempDir::new().unwrap();

    {
        let registry = ProtocolRegistry::load(open_store(&dir));
        registry.add(descriptor(9, 9), Hash256::from([9u8; 32]), &block(33));
    }

    let restarted = ProtocolRegistry::load(open_store(&dir));
    let entry = restarted.lookup(ProtocolId::new(9)).unwrap();
    assert_eq!(entry.block_height(), 33);
    assert_eq!(entry.descriptor().metadata(), b"protocol-9");
    assert!(entry.chain_block().is_none());
}
