//! RocksDB store backend.

use crate::keys::{self, ENTRY_KEY_PREFIX, TOTAL_COUNT_KEY};
use crate::serialization;
use crate::store::{ProtocolStore, StoredProtocolEntry};
use crate::Result;
use nfp_core::ProtocolId;
use rocksdb::{Direction, IteratorMode, Options, DB};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// RocksDB store configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Database directory
    pub path: PathBuf,
    /// Create the database if it does not exist
    pub create_if_missing: bool,
    /// Enable snappy compression
    pub compression: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/nfp"),
            create_if_missing: true,
            compression: true,
        }
    }
}

/// RocksDB-backed protocol store
pub struct RocksDbProtocolStore {
    db: DB,
}

impl RocksDbProtocolStore {
    /// Opens the database described by `config`
    pub fn open(config: &RocksDbConfig) -> Result<Self> {
        info!("opening protocol store at {:?}", config.path);

        let mut options = Options::default();
        options.create_if_missing(config.create_if_missing);
        options.set_compression_type(if config.compression {
            rocksdb::DBCompressionType::Snappy
        } else {
            rocksdb::DBCompressionType::None
        });

        let db = DB::open(&options, &config.path)?;
        Ok(Self { db })
    }
}

impl ProtocolStore for RocksDbProtocolStore {
    fn read_total_count(&self) -> Result<u64> {
        match self.db.get(TOTAL_COUNT_KEY)? {
            Some(bytes) => serialization::decode_count(&bytes),
            None => Ok(0),
        }
    }

    fn write_total_count(&mut self, count: u64) -> Result<()> {
        let bytes = serialization::encode_count(count)?;
        self.db.put(TOTAL_COUNT_KEY, bytes)?;
        Ok(())
    }

    fn scan_entries(&self, visit: &mut dyn FnMut(StoredProtocolEntry) -> bool) -> Result<()> {
        let mode = IteratorMode::From(ENTRY_KEY_PREFIX, Direction::Forward);
        for item in self.db.iterator(mode) {
            let (key, value) = item?;
            if !key.starts_with(ENTRY_KEY_PREFIX) {
                // Keys are sorted, so the first foreign key ends the prefix range.
                break;
            }
            let entry = match serialization::decode_entry(&value) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping undecodable protocol record {}: {}", hex::encode(&key), e);
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
        debug!("persisting protocol {}", entry.protocol_id());
        self.db.put(keys::entry_key(entry.protocol_id()), bytes)?;
        Ok(())
    }

    fn erase_entry(&mut self, protocol_id: ProtocolId) -> Result<()> {
        debug!("erasing protocol {}", protocol_id);
        self.db.delete(keys::entry_key(protocol_id))?;
        Ok(())
    }

    fn read_entry(&self, protocol_id: ProtocolId) -> Result<Option<StoredProtocolEntry>> {
        match self.db.get(keys::entry_key(protocol_id))? {
            Some(bytes) => Ok(Some(serialization::decode_entry(&bytes)?)),
            None => Ok(None),
        }
    }
}
