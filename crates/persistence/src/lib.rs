//! # NFP Persistence Layer
//!
//! Persistent storage for the NFT protocol registry.
//!
//! This crate defines the [`ProtocolStore`] contract the registry core
//! depends on, the on-disk record type and its codec, and two backends:
//! a RocksDB store for production deployments (feature `rocksdb`, on by
//! default) and an in-memory store used by tests and light deployments.
//!
//! The store is an already-durable, already-ordered key-value service from
//! the registry's point of view; how bytes are committed to disk is the
//! backend's concern.

#![warn(missing_docs)]

/// Storage key layout
pub mod keys;
/// In-memory store backend
pub mod memory_store;
/// RocksDB store backend
#[cfg(feature = "rocksdb")]
pub mod rocksdb_store;
/// Entry and counter codec
pub mod serialization;
/// Store contract and record types
pub mod store;

pub use memory_store::MemoryProtocolStore;
#[cfg(feature = "rocksdb")]
pub use rocksdb_store::{RocksDbConfig, RocksDbProtocolStore};
pub use store::{ProtocolStore, StoredProtocolEntry};

use thiserror::Error;

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence-specific error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage engine error
    #[error("database error: {0}")]
    Database(String),

    /// Record could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

#[cfg(feature = "rocksdb")]
impl From<rocksdb::Error> for StoreError {
    fn from(err: rocksdb::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}
