//! Binary Merkle tree example.
//!
//! Builds a tree, renders it, then proves and verifies every value.
//!
//! Run: `cargo run --example create_tree`

use bmtree::{BinaryMerkleTree, bytes32_to_hex};

fn main() -> bmtree::Result<()> {
    env_logger::init();

    let values = [1u64, 2, 3, 4, 5];
    let tree = BinaryMerkleTree::new();
    let report = tree.create_tree(values)?;

    println!("Root: {}", bytes32_to_hex(&tree.root()));
    println!(
        "Created {} leaves and {} internal nodes\n",
        report.leaves_created.len(),
        report.internal_nodes_created.len()
    );

    if let Some(snapshot) = tree.snapshot() {
        println!("Tree structure:");
        println!("{}\n", snapshot.render()?);
    }

    for value in values {
        let proof = tree.get_proof(value)?;
        println!("Value {}:", value);
        for hash in &proof {
            println!("  {}", bytes32_to_hex(hash));
        }
        println!("  Valid: {}\n", tree.check_proof(&proof));
    }

    // Dropping the leaf makes the chain start at an internal node
    let proof = tree.get_proof(5u64)?;
    let status = tree.proof_status(&proof[1..]);
    println!("Truncated proof: {} (code {})", status, status.code());

    Ok(())
}
