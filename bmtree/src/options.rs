use crate::bytes::Bytes32;
use crate::hashes::{LeafHashFn, NodeHashFn, default_leaf_hash, default_node_hash};
use crate::leaves::DataValue;

/// Hashing configuration for a tree. `None` selects the keccak256 defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    pub leaf_hash: Option<LeafHashFn>,
    pub node_hash: Option<NodeHashFn>,
}

impl TreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leaf_hash(mut self, leaf_hash: LeafHashFn) -> Self {
        self.leaf_hash = Some(leaf_hash);
        self
    }

    pub fn with_node_hash(mut self, node_hash: NodeHashFn) -> Self {
        self.node_hash = Some(node_hash);
        self
    }

    pub fn uses_custom_hash(&self) -> bool {
        self.leaf_hash.is_some() || self.node_hash.is_some()
    }

    pub fn hash_leaf(&self, value: &DataValue) -> Bytes32 {
        self.leaf_hash.unwrap_or(default_leaf_hash)(value)
    }

    pub fn hash_node(&self, left: &Bytes32, right: &Bytes32) -> Bytes32 {
        self.node_hash.unwrap_or(default_node_hash)(left, right)
    }
}
