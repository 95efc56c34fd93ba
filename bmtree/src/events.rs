//! Audit records of a tree construction.
//!
//! A successful build reports every leaf, every internal node and the root, in
//! creation order, so a caller can rebuild the whole tree off-line (see
//! [`TreeState::from_report`](crate::TreeState::from_report)).

use crate::bytes::{Bytes32, serde_hex};
use crate::leaves::DataValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafCreated {
    pub value: DataValue,
    #[serde(with = "serde_hex")]
    pub hash: Bytes32,
}

/// An internal node; `right` is `ZERO_HASH` when the left child had no sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCreated {
    #[serde(with = "serde_hex")]
    pub hash: Bytes32,
    #[serde(with = "serde_hex")]
    pub left: Bytes32,
    #[serde(with = "serde_hex")]
    pub right: Bytes32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeEvent {
    LeafCreated(LeafCreated),
    NodeCreated(NodeCreated),
    RootCreated(Bytes32),
}

/// Receives construction records. Only called once the whole build has
/// succeeded; a failed build emits nothing.
pub trait TreeObserver {
    fn on_event(&mut self, event: &TreeEvent);
}

impl<F: FnMut(&TreeEvent)> TreeObserver for F {
    fn on_event(&mut self, event: &TreeEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTreeReport {
    pub leaves_created: Vec<LeafCreated>,
    pub internal_nodes_created: Vec<NodeCreated>,
    #[serde(with = "serde_hex")]
    pub root: Bytes32,
}

impl CreateTreeReport {
    /// All records in emission order: leaves, internal nodes, then the root.
    pub fn events(&self) -> impl Iterator<Item = TreeEvent> + '_ {
        self.leaves_created
            .iter()
            .copied()
            .map(TreeEvent::LeafCreated)
            .chain(
                self.internal_nodes_created
                    .iter()
                    .copied()
                    .map(TreeEvent::NodeCreated),
            )
            .chain(std::iter::once(TreeEvent::RootCreated(self.root)))
    }

    pub fn emit_to(&self, observer: &mut dyn TreeObserver) {
        for event in self.events() {
            observer.on_event(&event);
        }
    }
}
