//! # bmtree
//!
//! A binary Merkle tree over distinct non-zero integers, with parent-linked
//! node storage and ancestor-chain membership proofs.
//!
//! ## Features
//!
//! - Order-preserving construction: leaves are paired in input order and a
//!   lone node at the end of a level is paired with `ZERO_HASH`
//! - Write-once node store keyed by hash; a repeated key aborts the build
//! - Proofs are the chain of ancestors from a leaf to the root, checked
//!   link by link against the recorded parents
//! - Audit records of every created leaf, internal node and root
//! - Dump/load of a tree with serde
//! - Keccak256 hashing over ABI-encoded `uint256` values (Ethereum compatible)
//!
//! ## Example
//!
//! ```rust
//! use bmtree::BinaryMerkleTree;
//!
//! let tree = BinaryMerkleTree::new();
//! let report = tree.create_tree([1u64, 2, 3]).unwrap();
//! assert_eq!(tree.root(), report.root);
//!
//! let proof = tree.get_proof(3u64).unwrap();
//! assert_eq!(proof.len(), 3);
//! assert!(tree.check_proof(&proof));
//! assert!(!tree.check_proof(&proof[1..]));
//! ```

#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bytes;
pub mod core;
pub mod error;
pub mod events;
pub mod hashes;
pub mod leaves;
pub mod live;
pub mod options;
pub mod store;
pub mod tree;

pub use bytes::{Bytes32, HexString, ToBytes32, ZERO_HASH, bytes32_to_hex, hex_to_bytes32};
pub use crate::core::ProofStatus;
pub use error::{InputError, MerkleTreeError, Result};
pub use events::{CreateTreeReport, LeafCreated, NodeCreated, TreeEvent, TreeObserver};
pub use hashes::{LeafHashFn, NodeHashFn, default_leaf_hash, default_node_hash, keccak256};
pub use leaves::{DataValue, ToDataValue};
pub use live::BinaryMerkleTree;
pub use options::TreeOptions;
pub use store::{Node, NodeStore};
pub use tree::{TreeData, TreeState};
