//! 160-bit key identifier for protocol owners.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size of a key identifier in bytes
pub const KEY_ID_SIZE: usize = 20;

/// A 160-bit key identifier naming the owner of a registered protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyId([u8; KEY_ID_SIZE]);

impl KeyId {
    /// The all-zero key identifier, used as the "no owner" sentinel
    pub const fn zero() -> Self {
        KeyId([0u8; KEY_ID_SIZE])
    }

    /// Checks whether this is the all-zero identifier
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Creates a key identifier from a byte slice.
    ///
    /// Returns [`CoreError::InvalidLength`] if the slice is not exactly
    /// [`KEY_ID_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_ID_SIZE {
            return Err(CoreError::InvalidLength {
                expected: KEY_ID_SIZE,
                actual: bytes.len(),
            });
        }
        let mut data = [0u8; KEY_ID_SIZE];
        data.copy_from_slice(bytes);
        Ok(KeyId(data))
    }

    /// Gets the identifier as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Default for KeyId {
    fn default() -> Self {
        KeyId::zero()
    }
}

impl From<[u8; KEY_ID_SIZE]> for KeyId {
    fn from(bytes: [u8; KEY_ID_SIZE]) -> Self {
        KeyId(bytes)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for KeyId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        KeyId::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert!(KeyId::zero().is_zero());
        assert!(!KeyId::from([1u8; KEY_ID_SIZE]).is_zero());
    }

    #[test]
    fn test_from_bytes_rejects_bad_length() {
        assert!(KeyId::from_bytes(&[0u8; 19]).is_err());
        assert!(KeyId::from_bytes(&[0u8; 21]).is_err());
        assert!(KeyId::from_bytes(&[0u8; KEY_ID_SIZE]).is_ok());
    }

    #[test]
    fn test_hex_round_trip() {
        let id = KeyId::from([0xabu8; KEY_ID_SIZE]);
        let parsed: KeyId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);

        let with_prefix: KeyId = format!("0x{id}").parse().unwrap();
        assert_eq!(with_prefix, id);
    }
}
