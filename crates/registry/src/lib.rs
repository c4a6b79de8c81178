//! # NFP Registry
//!
//! The stateful core of the NFT protocol registry: an in-memory multi-key
//! index of protocol registrations kept write-through consistent with a
//! persistent store and height-qualified against the chain tip.
//!
//! ## Components
//!
//! - [`ProtocolIndexEntry`]: one registration event (height, transaction,
//!   block, shared descriptor)
//! - [`ProtocolRegistry`]: the lock-guarded registry with add / lookup /
//!   delete / tip / range operations
//!
//! The registry is a library: block-connect logic, RPC handlers, and wallet
//! code drive it. Construct one registry per node and pass it by reference;
//! there is no global instance.

#![warn(missing_docs)]

/// Registration index entry
pub mod entry;
/// Multi-key in-memory index
mod index;
/// Reverse-anchored pagination window
mod pagination;
/// The registry itself
pub mod registry;

pub use entry::ProtocolIndexEntry;
pub use registry::{ProtocolRegistry, RegistryStats};
