use crate::bytes::Bytes32;
use crate::leaves::DataValue;
use alloy_primitives::B256;
use alloy_sol_types::SolValue;
use sha3::{Digest, Keccak256};

#[must_use]
pub fn keccak256(data: &[u8]) -> Bytes32 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

pub type LeafHashFn = fn(&DataValue) -> Bytes32;

pub type NodeHashFn = fn(&Bytes32, &Bytes32) -> Bytes32;

/// `keccak256` of the value as one ABI word (32 bytes, big-endian).
#[must_use]
pub fn default_leaf_hash(value: &DataValue) -> Bytes32 {
    keccak256(&value.abi_encode())
}

/// `keccak256(left ‖ right)`. Operands are never reordered.
#[must_use]
pub fn default_node_hash(left: &Bytes32, right: &Bytes32) -> Bytes32 {
    let packed = (B256::from(*left), B256::from(*right)).abi_encode_packed();
    keccak256(&packed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::{ZERO_HASH, bytes32_to_hex};
    use alloy_primitives::U256;

    #[test]
    fn test_keccak256_known_value() {
        let hash = keccak256(b"hello");
        assert_eq!(
            bytes32_to_hex(&hash),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_leaf_hash_is_uint256_word() {
        let hash = default_leaf_hash(&U256::from(1u64));
        assert_eq!(
            bytes32_to_hex(&hash),
            "0xb10e2d527612073b26eecdfd717e6a320cf44b4afac2b0732d9fcbe2b7fa0cf6"
        );

        let mut word = [0u8; 32];
        word[31] = 1;
        assert_eq!(hash, keccak256(&word));
    }

    #[test]
    fn test_node_hash_is_concatenation() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        let mut concatenated = Vec::with_capacity(64);
        concatenated.extend_from_slice(&a);
        concatenated.extend_from_slice(&b);

        assert_eq!(default_node_hash(&a, &b), keccak256(&concatenated));
    }

    #[test]
    fn test_node_hash_order_sensitive() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        assert_ne!(default_node_hash(&a, &b), default_node_hash(&b, &a));
    }

    #[test]
    fn test_node_hash_with_zero_sibling() {
        let a = default_leaf_hash(&U256::from(3u64));
        let padded = default_node_hash(&a, &ZERO_HASH);
        assert_ne!(padded, ZERO_HASH);
        assert_ne!(padded, a);
    }
}
