use crate::bytes::{Bytes32, ZERO_HASH, bytes32_to_hex, is_zero_hash};
use crate::error::{MerkleTreeError, Result};
use indexmap::IndexMap;

/// One record of the tree, addressed by its own hash.
///
/// Children and parent are hashes, resolved through the owning [`NodeStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub hash: Bytes32,
    pub left: Option<Bytes32>,
    /// `None` both for leaves and for internal nodes padded with `ZERO_HASH`.
    pub right: Option<Bytes32>,
    pub parent: Option<Bytes32>,
    pub is_leaf: bool,
}

impl Node {
    pub fn leaf(hash: Bytes32) -> Self {
        Self {
            hash,
            left: None,
            right: None,
            parent: None,
            is_leaf: true,
        }
    }

    pub fn internal(hash: Bytes32, left: Bytes32, right: Option<Bytes32>) -> Self {
        Self {
            hash,
            left: Some(left),
            right,
            parent: None,
            is_leaf: false,
        }
    }

    /// Right child as hashed: `ZERO_HASH` when there is no real sibling.
    pub fn right_or_zero(&self) -> Bytes32 {
        self.right.unwrap_or(ZERO_HASH)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Append-only arena of nodes keyed by hash, in insertion order.
///
/// Keys are never replaced and each node's parent is assigned at most once.
/// Mutation is crate-private; a built tree hands the store out by shared
/// reference only.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: IndexMap<Bytes32, Node>,
    root: Option<Bytes32>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: IndexMap::with_capacity(capacity),
            root: None,
        }
    }

    pub fn get(&self, hash: &Bytes32) -> Option<&Node> {
        self.nodes.get(hash)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root hash, or `ZERO_HASH` when no tree has been built.
    pub fn root(&self) -> Bytes32 {
        self.root.unwrap_or(ZERO_HASH)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn reset(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn insert(&mut self, node: Node) -> Result<()> {
        if is_zero_hash(&node.hash) || self.nodes.contains_key(&node.hash) {
            return Err(MerkleTreeError::HashCollision(bytes32_to_hex(&node.hash)));
        }
        self.nodes.insert(node.hash, node);
        Ok(())
    }

    /// Records `parent` on `child`. A child that already has a parent means two
    /// distinct nodes hashed to the same key.
    pub(crate) fn link_parent(&mut self, child: &Bytes32, parent: Bytes32) -> Result<()> {
        let node = self.nodes.get_mut(child).ok_or_else(|| {
            MerkleTreeError::Invariant(format!("child {} is not stored", bytes32_to_hex(child)))
        })?;
        if node.parent.is_some() {
            return Err(MerkleTreeError::HashCollision(bytes32_to_hex(child)));
        }
        node.parent = Some(parent);
        Ok(())
    }

    pub(crate) fn set_root(&mut self, root: Bytes32) -> Result<()> {
        let node = self.nodes.get(&root).ok_or_else(|| {
            MerkleTreeError::Invariant(format!("root {} is not stored", bytes32_to_hex(&root)))
        })?;
        if node.parent.is_some() {
            return Err(MerkleTreeError::Invariant(format!(
                "root {} has a parent",
                bytes32_to_hex(&root)
            )));
        }
        self.root = Some(root);
        Ok(())
    }
}
