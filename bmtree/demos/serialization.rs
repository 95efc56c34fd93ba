//! Serialization example.
//!
//! Dumps a tree to JSON, loads it back, and rebuilds a tree off-line from
//! the construction records alone.
//!
//! Run: `cargo run --example serialization`

use bmtree::{BinaryMerkleTree, CreateTreeReport, TreeData, TreeOptions, TreeState, bytes32_to_hex};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() -> Result<()> {
    let tree = BinaryMerkleTree::new();
    let report = tree.create_tree([11u64, 22, 33])?;
    println!("Original root: {}", bytes32_to_hex(&tree.root()));

    println!("\n=== Dump / load ===\n");
    let snapshot = tree.snapshot().ok_or("no live tree")?;
    let json_str = serde_json::to_string_pretty(&snapshot.dump())?;
    println!("Serialized JSON:\n{}", json_str);

    let data: TreeData = serde_json::from_str(&json_str)?;
    let loaded = TreeState::load(data, TreeOptions::default())?;
    println!("\nLoaded root: {}", bytes32_to_hex(&loaded.root()));
    println!("Roots match: {}", loaded.root() == tree.root());

    println!("\n=== Off-line reconstruction ===\n");
    let records = serde_json::to_string(&report)?;
    let received: CreateTreeReport = serde_json::from_str(&records)?;
    let rebuilt = TreeState::from_report(&received, TreeOptions::default())?;

    let proof = tree.get_proof(22u64)?;
    println!("Proof for 22 checked off-line: {}", rebuilt.check_proof(&proof));

    Ok(())
}
