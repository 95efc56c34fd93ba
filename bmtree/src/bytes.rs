use crate::error::{MerkleTreeError, Result};
use alloy_primitives::B256;

pub type Bytes32 = [u8; 32];
pub type HexString = String;

/// Placeholder right child for the lone rightmost node of an odd-sized level.
///
/// Reserved: the builder refuses to store any node whose hash equals it.
pub const ZERO_HASH: Bytes32 = [0u8; 32];

pub trait ToBytes32 {
    fn to_bytes32(&self) -> Result<Bytes32>;
}

impl ToBytes32 for [u8; 32] {
    fn to_bytes32(&self) -> Result<Bytes32> {
        Ok(*self)
    }
}

impl ToBytes32 for &[u8] {
    fn to_bytes32(&self) -> Result<Bytes32> {
        if self.len() != 32 {
            return Err(MerkleTreeError::InvalidNodeLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(self);
        Ok(arr)
    }
}

impl ToBytes32 for Vec<u8> {
    fn to_bytes32(&self) -> Result<Bytes32> {
        self.as_slice().to_bytes32()
    }
}

impl ToBytes32 for &str {
    fn to_bytes32(&self) -> Result<Bytes32> {
        hex_to_bytes32(self)
    }
}

impl ToBytes32 for String {
    fn to_bytes32(&self) -> Result<Bytes32> {
        hex_to_bytes32(self)
    }
}

impl ToBytes32 for &String {
    fn to_bytes32(&self) -> Result<Bytes32> {
        hex_to_bytes32(self)
    }
}

impl ToBytes32 for B256 {
    fn to_bytes32(&self) -> Result<Bytes32> {
        Ok(self.0)
    }
}

pub fn hex_to_bytes32(s: &str) -> Result<Bytes32> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| MerkleTreeError::HexDecode(e.to_string()))?;
    bytes.as_slice().to_bytes32()
}

#[must_use]
pub fn bytes32_to_hex(bytes: &Bytes32) -> HexString {
    format!("0x{}", hex::encode(bytes))
}

#[inline]
#[must_use]
pub fn is_zero_hash(hash: &Bytes32) -> bool {
    *hash == ZERO_HASH
}

/// Serde adapter writing a [`Bytes32`] as a `0x`-prefixed hex string.
pub mod serde_hex {
    use super::{Bytes32, bytes32_to_hex, hex_to_bytes32};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(hash: &Bytes32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&bytes32_to_hex(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes32, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex_to_bytes32(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MerkleTreeError;

    #[test]
    fn test_hex_roundtrip() {
        let original = [0xab; 32];
        let hex = bytes32_to_hex(&original);
        assert!(hex.starts_with("0x"));
        assert_eq!(hex.len(), 66);
        let recovered = hex_to_bytes32(&hex).unwrap();
        assert_eq!(original, recovered);
    }

    #[test]
    fn test_hex_without_prefix() {
        let hex = "0000000000000000000000000000000000000000000000000000000000000001";
        let bytes = hex_to_bytes32(hex).unwrap();
        assert_eq!(bytes[31], 1);
    }

    #[test]
    fn test_invalid_hex_length() {
        let result = hex_to_bytes32("0x00");
        assert!(matches!(result, Err(MerkleTreeError::InvalidNodeLength)));
    }

    #[test]
    fn test_invalid_hex_digit() {
        let hex = "0xzz00000000000000000000000000000000000000000000000000000000000000";
        let result = hex_to_bytes32(hex);
        assert!(matches!(result, Err(MerkleTreeError::HexDecode(_))));
    }

    #[test]
    fn test_zero_hash() {
        assert!(is_zero_hash(&ZERO_HASH));
        assert!(!is_zero_hash(&[1u8; 32]));
        assert_eq!(
            bytes32_to_hex(&ZERO_HASH),
            "0x0000000000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_to_bytes32_conversions() {
        let slice: &[u8] = &[1u8; 32];
        assert_eq!(slice.to_bytes32().unwrap(), [1u8; 32]);
        assert_eq!(vec![2u8; 32].to_bytes32().unwrap(), [2u8; 32]);
        assert_eq!(B256::from([3u8; 32]).to_bytes32().unwrap(), [3u8; 32]);

        let short: &[u8] = &[1u8; 31];
        assert!(matches!(
            short.to_bytes32(),
            Err(MerkleTreeError::InvalidNodeLength)
        ));
    }
}
