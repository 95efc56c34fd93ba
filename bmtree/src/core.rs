use crate::bytes::{Bytes32, ToBytes32, ZERO_HASH, bytes32_to_hex};
use crate::error::{MerkleTreeError, Result, invariant, validate_argument};
use crate::events::{CreateTreeReport, LeafCreated, NodeCreated};
use crate::leaves::Leaves;
use crate::options::TreeOptions;
use crate::store::{Node, NodeStore};
use log::trace;
use std::fmt;

/// Builds the tree for `leaves` into a fresh store.
///
/// Level 0 is the leaf hashes in input order. Each level is paired left to
/// right; a lone last node is paired with `ZERO_HASH`. On error the partial
/// store is dropped.
pub fn build_tree(
    leaves: &Leaves,
    options: &TreeOptions,
) -> Result<(NodeStore, CreateTreeReport)> {
    validate_argument(leaves.len() >= 2, "Expected at least two leaves")?;

    let mut store = NodeStore::with_capacity(2 * leaves.len());
    let mut leaves_created = Vec::with_capacity(leaves.len());
    for &(value, hash) in leaves.entries() {
        store.insert(Node::leaf(hash))?;
        leaves_created.push(LeafCreated { value, hash });
    }

    let mut internal_nodes_created = Vec::with_capacity(leaves.len());
    let mut level = leaves.hashes();
    let mut depth = 0usize;

    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        for pair in level.chunks(2) {
            let left = pair[0];
            let right = pair.get(1).copied();
            let hash = options.hash_node(&left, &right.unwrap_or(ZERO_HASH));

            store.insert(Node::internal(hash, left, right))?;
            store.link_parent(&left, hash)?;
            if let Some(right) = &right {
                store.link_parent(right, hash)?;
            }

            internal_nodes_created.push(NodeCreated {
                hash,
                left,
                right: right.unwrap_or(ZERO_HASH),
            });
            next.push(hash);
        }
        depth += 1;
        trace!("level {} paired into {} nodes", depth, next.len());
        level = next;
    }

    let root = level[0];
    store.set_root(root)?;

    let report = CreateTreeReport {
        leaves_created,
        internal_nodes_created,
        root,
    };
    Ok((store, report))
}

/// Ancestor chain from `leaf` to the root, both included.
pub fn get_proof(store: &NodeStore, leaf: &Bytes32) -> Result<Vec<Bytes32>> {
    let mut proof = Vec::new();
    let mut current = Some(*leaf);

    while let Some(hash) = current {
        invariant(
            proof.len() < store.len(),
            "Parent chain is longer than the tree",
        )?;
        let node = store.get(&hash).ok_or_else(|| missing_node(&hash))?;
        proof.push(hash);
        current = node.parent;
    }

    Ok(proof)
}

fn missing_node(hash: &Bytes32) -> MerkleTreeError {
    MerkleTreeError::Invariant(format!("Node {} is not stored", bytes32_to_hex(hash)))
}

/// Outcome of checking an ancestor-chain proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProofStatus {
    Valid,
    Empty,
    /// The element at `index` is not a 32-byte hash.
    Malformed { index: usize },
    /// The element at `index` is not in the tree.
    UnknownHash { index: usize },
    /// The chain does not start at a leaf.
    NotALeaf,
    /// The node at `index` does not have `proof[index + 1]` as its parent.
    BrokenLink { index: usize },
    /// The chain ends somewhere other than the live root.
    RootMismatch,
}

impl ProofStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, ProofStatus::Valid)
    }

    /// Numeric status, `0` for a valid proof.
    pub fn code(&self) -> u8 {
        match self {
            ProofStatus::Valid => 0,
            ProofStatus::Empty => 1,
            ProofStatus::Malformed { .. } => 2,
            ProofStatus::UnknownHash { .. } => 3,
            ProofStatus::NotALeaf => 4,
            ProofStatus::BrokenLink { .. } => 5,
            ProofStatus::RootMismatch => 6,
        }
    }
}

impl fmt::Display for ProofStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofStatus::Valid => write!(f, "valid"),
            ProofStatus::Empty => write!(f, "empty proof"),
            ProofStatus::Malformed { index } => write!(f, "malformed hash at {index}"),
            ProofStatus::UnknownHash { index } => write!(f, "unknown hash at {index}"),
            ProofStatus::NotALeaf => write!(f, "proof does not start at a leaf"),
            ProofStatus::BrokenLink { index } => write!(f, "broken link after {index}"),
            ProofStatus::RootMismatch => write!(f, "proof does not end at the root"),
        }
    }
}

/// Replays `proof` against `store`. Every link must match a recorded parent,
/// the first element must be a leaf and the last the store's root.
pub fn check_proof<T: ToBytes32>(store: &NodeStore, proof: &[T]) -> ProofStatus {
    if proof.is_empty() {
        return ProofStatus::Empty;
    }

    let mut hashes = Vec::with_capacity(proof.len());
    for (index, element) in proof.iter().enumerate() {
        match element.to_bytes32() {
            Ok(hash) => hashes.push(hash),
            Err(_) => return ProofStatus::Malformed { index },
        }
    }

    match store.get(&hashes[0]) {
        None => return ProofStatus::UnknownHash { index: 0 },
        Some(node) if !node.is_leaf => return ProofStatus::NotALeaf,
        Some(_) => {}
    }

    for (index, link) in hashes.windows(2).enumerate() {
        let Some(node) = store.get(&link[0]) else {
            return ProofStatus::UnknownHash { index };
        };
        if node.parent != Some(link[1]) {
            return ProofStatus::BrokenLink { index };
        }
    }

    match hashes.last() {
        Some(last) if *last == store.root() => ProofStatus::Valid,
        _ => ProofStatus::RootMismatch,
    }
}

pub fn render_tree(store: &NodeStore) -> Result<String> {
    validate_argument(!store.is_empty(), "Expected non-zero number of nodes")?;

    // `None` marks the ZERO_HASH padding of an unpaired node.
    let mut stack: Vec<(Option<Bytes32>, Vec<usize>)> = vec![(Some(store.root()), vec![])];
    let mut lines = Vec::new();

    while let Some((hash, path)) = stack.pop() {
        let mut line = String::new();

        for &p in path.iter().take(path.len().saturating_sub(1)) {
            line.push_str(if p == 0 { "   " } else { "│  " });
        }

        if let Some(&last) = path.last() {
            line.push_str(if last == 0 { "└─ " } else { "├─ " });
        }

        let Some(hash) = hash else {
            line.push_str("(none)");
            lines.push(line);
            continue;
        };

        line.push_str(&bytes32_to_hex(&hash));
        lines.push(line);

        let node = store.get(&hash).ok_or_else(|| missing_node(&hash))?;
        if let Some(left) = node.left {
            stack.push((node.right, [path.clone(), vec![0]].concat()));
            stack.push((Some(left), [path.clone(), vec![1]].concat()));
        }
    }

    Ok(lines.join("\n"))
}
