use crate::bytes::{Bytes32, ToBytes32, bytes32_to_hex};
use crate::core::{ProofStatus, build_tree, check_proof, get_proof, render_tree};
use crate::error::{MerkleTreeError, Result, invariant, validate_argument};
use crate::events::{CreateTreeReport, LeafCreated, NodeCreated};
use crate::leaves::{DataValue, Leaves, ToDataValue};
use crate::options::TreeOptions;
use crate::store::{Node, NodeStore};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

const FORMAT: &str = "binary-v1";

/// Serialized form of a [`TreeState`]: the construction records plus a format tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeData {
    pub format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(flatten)]
    pub records: CreateTreeReport,
}

/// One built tree. Immutable: every method takes `&self`.
#[derive(Debug, Clone)]
pub struct TreeState {
    store: NodeStore,
    leaves: Leaves,
    options: TreeOptions,
}

impl TreeState {
    /// Validates `values`, hashes them and builds the whole tree.
    pub fn create<I, V>(values: I, options: TreeOptions) -> Result<(Self, CreateTreeReport)>
    where
        I: IntoIterator<Item = V>,
        V: ToDataValue,
    {
        let leaves = Leaves::validate(values, &options)?;
        let (store, report) = build_tree(&leaves, &options)?;
        debug!(
            "built tree of {} values ({} nodes), root {}",
            leaves.len(),
            store.len(),
            bytes32_to_hex(&report.root)
        );
        Ok((
            Self {
                store,
                leaves,
                options,
            },
            report,
        ))
    }

    /// Rebuilds a tree from its construction records and checks that every
    /// record matches what building the same values produces.
    pub fn from_report(report: &CreateTreeReport, options: TreeOptions) -> Result<Self> {
        let leaves = Leaves::validate(report.leaves_created.iter().map(|l| l.value), &options)?;
        for (record, (_, hash)) in report.leaves_created.iter().zip(leaves.entries()) {
            invariant(
                record.hash == *hash,
                format!("Leaf hash for value {} does not match", record.value),
            )?;
        }

        let (store, rebuilt) = build_tree(&leaves, &options)?;
        invariant(
            rebuilt.internal_nodes_created == report.internal_nodes_created,
            "Merkle tree is invalid",
        )?;
        invariant(rebuilt.root == report.root, "Merkle tree root does not match")?;

        trace!("reconstructed tree {}", bytes32_to_hex(&rebuilt.root));
        Ok(Self {
            store,
            leaves,
            options,
        })
    }

    pub fn load(data: TreeData, options: TreeOptions) -> Result<Self> {
        validate_argument(
            data.format == FORMAT,
            format!("Unknown format '{}'", data.format),
        )?;

        let has_custom = data.hash.as_deref() == Some("custom");
        validate_argument(
            options.uses_custom_hash() == has_custom,
            if options.uses_custom_hash() {
                "Data does not expect a custom hashing function"
            } else {
                "Data expects a custom hashing function"
            },
        )?;

        Self::from_report(&data.records, options)
    }

    pub fn dump(&self) -> TreeData {
        TreeData {
            format: FORMAT.to_string(),
            hash: if self.options.uses_custom_hash() {
                Some("custom".to_string())
            } else {
                None
            },
            records: self.report(),
        }
    }

    /// The construction records of this tree, recovered from the store.
    pub fn report(&self) -> CreateTreeReport {
        CreateTreeReport {
            leaves_created: self
                .leaves
                .entries()
                .iter()
                .map(|&(value, hash)| LeafCreated { value, hash })
                .collect(),
            internal_nodes_created: self
                .store
                .nodes()
                .filter(|n| !n.is_leaf)
                .filter_map(|n| {
                    n.left.map(|left| NodeCreated {
                        hash: n.hash,
                        left,
                        right: n.right_or_zero(),
                    })
                })
                .collect(),
            root: self.root(),
        }
    }

    pub fn root(&self) -> Bytes32 {
        self.store.root()
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn get_node(&self, hash: &Bytes32) -> Option<&Node> {
        self.store.get(hash)
    }

    /// Number of values (leaves).
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn contains(&self, value: &DataValue) -> bool {
        self.leaves.hash_of(value).is_some()
    }

    pub fn leaf_hash(&self, value: &DataValue) -> Option<Bytes32> {
        self.leaves.hash_of(value).copied()
    }

    /// Values with their leaf hashes, in input order.
    pub fn entries(&self) -> impl Iterator<Item = (DataValue, Bytes32)> + '_ {
        self.leaves.entries().iter().copied()
    }

    pub fn get_proof<V: ToDataValue>(&self, value: V) -> Result<Vec<Bytes32>> {
        let value = value.to_data_value();
        let leaf = self
            .leaves
            .hash_of(&value)
            .ok_or(MerkleTreeError::ProofNotFound(value))?;
        get_proof(&self.store, leaf)
    }

    pub fn proof_status<T: ToBytes32>(&self, proof: &[T]) -> ProofStatus {
        let status = check_proof(&self.store, proof);
        if !status.is_valid() {
            debug!("rejected proof of {} hashes: {}", proof.len(), status);
        }
        status
    }

    pub fn check_proof<T: ToBytes32>(&self, proof: &[T]) -> bool {
        self.proof_status(proof).is_valid()
    }

    pub fn render(&self) -> Result<String> {
        render_tree(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::ZERO_HASH;
    use crate::error::InputError;
    use crate::hashes::{default_leaf_hash, default_node_hash};
    use alloy_primitives::U256;

    fn create(values: &[u64]) -> (TreeState, CreateTreeReport) {
        TreeState::create(values.iter().copied(), TreeOptions::default()).unwrap()
    }

    fn flipped_node_hash(a: &Bytes32, b: &Bytes32) -> Bytes32 {
        let mut out = default_node_hash(a, b);
        out[0] ^= 0xff;
        out
    }

    #[test]
    fn test_create_and_prove() {
        let values = [11u64, 22, 33, 44, 55];
        let (tree, report) = create(&values);

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.root(), report.root);
        for v in values {
            let proof = tree.get_proof(v).unwrap();
            assert!(tree.check_proof(&proof));
        }
    }

    #[test]
    fn test_worked_example() {
        let (tree, _) = create(&[1, 2, 3]);
        let h3 = default_leaf_hash(&U256::from(3u64));
        let p_b = default_node_hash(&h3, &ZERO_HASH);

        assert_eq!(tree.get_proof(3u64).unwrap(), vec![h3, p_b, tree.root()]);
        assert!(tree.check_proof(&[h3, p_b, tree.root()]));
    }

    #[test]
    fn test_proof_not_found() {
        let (tree, _) = create(&[1, 2, 3]);
        assert_eq!(
            tree.get_proof(4u64).unwrap_err(),
            MerkleTreeError::ProofNotFound(U256::from(4u64))
        );
        assert!(!tree.contains(&U256::from(4u64)));
        assert!(tree.contains(&U256::from(3u64)));
    }

    #[test]
    fn test_invalid_input() {
        let result = TreeState::create(Vec::<u64>::new(), TreeOptions::default());
        assert!(matches!(
            result,
            Err(MerkleTreeError::InputValidation(InputError::TooFewValues(0)))
        ));
    }

    #[test]
    fn test_get_node() {
        let (tree, _) = create(&[1, 2]);
        let root = tree.get_node(&tree.root()).unwrap();
        assert!(root.is_root());
        assert!(!root.is_leaf);
        assert!(tree.get_node(&ZERO_HASH).is_none());
    }

    #[test]
    fn test_report_matches_creation() {
        let (tree, report) = create(&[8, 6, 7, 5, 3, 0x9]);
        assert_eq!(tree.report(), report);
    }

    #[test]
    fn test_from_report() {
        let (tree, report) = create(&[10, 20, 30, 40, 50, 60, 70]);
        let rebuilt = TreeState::from_report(&report, TreeOptions::default()).unwrap();

        assert_eq!(rebuilt.root(), tree.root());
        let proof = tree.get_proof(40u64).unwrap();
        assert!(rebuilt.check_proof(&proof));
        assert_eq!(rebuilt.get_proof(40u64).unwrap(), proof);
    }

    #[test]
    fn test_from_report_rejects_tampering() {
        let (_, report) = create(&[10, 20, 30]);

        let mut bad_root = report.clone();
        bad_root.root = [1u8; 32];
        assert!(matches!(
            TreeState::from_report(&bad_root, TreeOptions::default()),
            Err(MerkleTreeError::Invariant(_))
        ));

        let mut bad_leaf = report.clone();
        bad_leaf.leaves_created[1].hash = [2u8; 32];
        assert!(matches!(
            TreeState::from_report(&bad_leaf, TreeOptions::default()),
            Err(MerkleTreeError::Invariant(_))
        ));

        let mut bad_node = report.clone();
        bad_node.internal_nodes_created.swap(0, 1);
        assert!(matches!(
            TreeState::from_report(&bad_node, TreeOptions::default()),
            Err(MerkleTreeError::Invariant(_))
        ));

        let mut duplicate = report;
        duplicate.leaves_created[2].value = U256::from(10u64);
        assert!(matches!(
            TreeState::from_report(&duplicate, TreeOptions::default()),
            Err(MerkleTreeError::InputValidation(_))
        ));
    }

    #[test]
    fn test_dump_and_load() {
        let (tree, _) = create(&[1, 2, 3, 4]);
        let data = tree.dump();
        assert_eq!(data.format, "binary-v1");
        assert!(data.hash.is_none());

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"format\":\"binary-v1\""));
        assert!(json.contains("leavesCreated"));
        assert!(!json.contains("\"hash\":\"custom\""));

        let loaded_data: TreeData = serde_json::from_str(&json).unwrap();
        let loaded = TreeState::load(loaded_data, TreeOptions::default()).unwrap();

        assert_eq!(loaded.root(), tree.root());
        assert_eq!(loaded.render().unwrap(), tree.render().unwrap());
    }

    #[test]
    fn test_load_custom_hash() {
        let options = TreeOptions::new().with_node_hash(flipped_node_hash);
        let (tree, _) = TreeState::create([1u64, 2, 3], options).unwrap();
        let data = tree.dump();
        assert_eq!(data.hash.as_deref(), Some("custom"));

        let result = TreeState::load(data.clone(), TreeOptions::default());
        assert!(matches!(result, Err(MerkleTreeError::InvalidArgument(_))));

        let loaded = TreeState::load(data, options).unwrap();
        assert_eq!(loaded.root(), tree.root());
    }

    #[test]
    fn test_load_unknown_format() {
        let (tree, _) = create(&[1, 2]);
        let mut data = tree.dump();
        data.format = "simple-v1".to_string();
        let result = TreeState::load(data, TreeOptions::default());
        assert!(matches!(result, Err(MerkleTreeError::InvalidArgument(_))));
    }

    #[test]
    fn test_entries_in_input_order() {
        let (tree, _) = create(&[9, 4, 7]);
        let values: Vec<u64> = tree.entries().map(|(v, _)| v.to::<u64>()).collect();
        assert_eq!(values, vec![9, 4, 7]);
        assert_eq!(
            tree.leaf_hash(&U256::from(4u64)),
            Some(default_leaf_hash(&U256::from(4u64)))
        );
    }
}
