//! The host holding the single live tree.
//!
//! A new tree is built without holding any lock and then swapped in as a
//! whole, so readers see either the previous tree or the new one. Readers
//! work on an `Arc` snapshot and never block construction for longer than
//! the pointer swap.

use crate::bytes::{Bytes32, ToBytes32, ZERO_HASH, bytes32_to_hex};
use crate::core::{ProofStatus, check_proof};
use crate::error::{MerkleTreeError, Result};
use crate::events::{CreateTreeReport, TreeObserver};
use crate::leaves::{DataValue, ToDataValue};
use crate::options::TreeOptions;
use crate::store::{Node, NodeStore};
use crate::tree::TreeState;
use log::{debug, warn};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct BinaryMerkleTree {
    options: TreeOptions,
    current: RwLock<Option<Arc<TreeState>>>,
}

impl BinaryMerkleTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TreeOptions) -> Self {
        Self {
            options,
            current: RwLock::new(None),
        }
    }

    /// Builds a tree from `values` and makes it the live tree.
    ///
    /// On failure the previous tree, if any, stays live.
    pub fn create_tree<I, V>(&self, values: I) -> Result<CreateTreeReport>
    where
        I: IntoIterator<Item = V>,
        V: ToDataValue,
    {
        let (state, report) = TreeState::create(values, self.options).inspect_err(|e| {
            warn!("tree construction aborted: {}", e);
        })?;
        self.replace(state);
        Ok(report)
    }

    /// Same as [`create_tree`](Self::create_tree), then hands every record
    /// to `observer`. Nothing is emitted when construction fails.
    pub fn create_tree_with_observer<I, V>(
        &self,
        values: I,
        observer: &mut dyn TreeObserver,
    ) -> Result<CreateTreeReport>
    where
        I: IntoIterator<Item = V>,
        V: ToDataValue,
    {
        let report = self.create_tree(values)?;
        report.emit_to(observer);
        Ok(report)
    }

    /// Makes `state` the live tree, dropping the previous one.
    pub fn replace(&self, state: TreeState) {
        let root = state.root();
        let previous = self.current.write().replace(Arc::new(state));
        debug!(
            "live tree root {} (replaced {})",
            bytes32_to_hex(&root),
            previous.map_or_else(|| "nothing".to_string(), |p| bytes32_to_hex(&p.root()))
        );
    }

    /// The live tree, if one has been built.
    pub fn snapshot(&self) -> Option<Arc<TreeState>> {
        self.current.read().clone()
    }

    /// Root of the live tree, `ZERO_HASH` before the first successful build.
    pub fn root(&self) -> Bytes32 {
        self.snapshot().map_or(ZERO_HASH, |tree| tree.root())
    }

    pub fn get_proof<V: ToDataValue>(&self, value: V) -> Result<Vec<Bytes32>> {
        let value: DataValue = value.to_data_value();
        match self.snapshot() {
            Some(tree) => tree.get_proof(value),
            None => Err(MerkleTreeError::ProofNotFound(value)),
        }
    }

    pub fn proof_status<T: ToBytes32>(&self, proof: &[T]) -> ProofStatus {
        match self.snapshot() {
            Some(tree) => tree.proof_status(proof),
            None => check_proof(&NodeStore::new(), proof),
        }
    }

    pub fn check_proof<T: ToBytes32>(&self, proof: &[T]) -> bool {
        self.proof_status(proof).is_valid()
    }

    pub fn get_node(&self, hash: &Bytes32) -> Option<Node> {
        self.snapshot()
            .and_then(|tree| tree.get_node(hash).copied())
    }
}
