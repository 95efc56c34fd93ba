use crate::leaves::DataValue;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleTreeError {
    #[error("Invalid input: {0}")]
    InputValidation(#[from] InputError),

    #[error("Hash collision at {0}")]
    HashCollision(String),

    #[error("No proof for value {0}: not in the current tree")]
    ProofNotFound(DataValue),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invariant violation: {0}")]
    Invariant(String),

    #[error("Merkle tree nodes must be 32 bytes")]
    InvalidNodeLength,

    #[error("Hex decode error: {0}")]
    HexDecode(String),
}

/// Reasons a value set is refused before any hashing happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("expected at least 2 values, got {0}")]
    TooFewValues(usize),

    #[error("value at position {0} is zero")]
    ZeroValue(usize),

    #[error("value {value} appears at positions {first} and {second}")]
    DuplicateValue {
        value: DataValue,
        first: usize,
        second: usize,
    },
}

pub type Result<T> = std::result::Result<T, MerkleTreeError>;

#[inline]
pub fn validate_argument<T: AsRef<str>>(condition: bool, message: T) -> Result<()> {
    if !condition {
        Err(MerkleTreeError::InvalidArgument(
            message.as_ref().to_string(),
        ))
    } else {
        Ok(())
    }
}

#[inline]
pub fn invariant<T: AsRef<str>>(condition: bool, message: T) -> Result<()> {
    if !condition {
        Err(MerkleTreeError::Invariant(message.as_ref().to_string()))
    } else {
        Ok(())
    }
}
