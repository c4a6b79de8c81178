//! # NFP Core
//!
//! Core value types shared across the NFT protocol registry.
//!
//! This crate provides the fundamental types every other crate builds on:
//! protocol identifiers, fixed-size key and hash types, the immutable
//! protocol descriptor, and the chain block reference the registry observes
//! but never owns.

#![warn(missing_docs)]

/// Chain block references observed by the registry
pub mod chain;
/// Immutable protocol descriptor
pub mod descriptor;
/// Core error types
pub mod error;
/// 256-bit hash type for block and transaction hashes
pub mod hash256;
/// 160-bit key identifier for protocol owners
pub mod key_id;
/// Protocol identifier type
pub mod protocol_id;

pub use chain::ChainBlock;
pub use descriptor::ProtocolDescriptor;
pub use error::{CoreError, Result};
pub use hash256::{BlockHash, Hash256, TxHash};
pub use key_id::KeyId;
pub use protocol_id::ProtocolId;
