//! Error types for tensem.

use thiserror::Error;

/// The main error type for tensem operations.
#[derive(Debug, Error)]
pub enum TensemError {
    /// A vector used as a truth value is not one of the two basis vectors.
    #[error("invalid truth value: {0:?} is neither TRUE (1,0) nor FALSE (0,1)")]
    InvalidTruthValue(Vec<f32>),

    /// A vector used as an entity is not one-hot.
    #[error("invalid entity vector: {0:?} is not one-hot")]
    InvalidEntityVector(Vec<f32>),

    /// Operands of an operation have incompatible shapes.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    /// Entity index outside `[0, N)`.
    #[error("entity index {index} out of range for domain of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Tensor has the wrong shape or breaks its structural invariant.
    #[error("malformed tensor: {0}")]
    MalformedTensor(String),

    /// Entity name not in the domain's ordering.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// Named set not defined in the world.
    #[error("unknown set: {0}")]
    UnknownSet(String),

    /// Einsum notation without a contraction kernel.
    #[error("unsupported contraction: {0}")]
    UnsupportedContraction(String),

    /// Candle tensor operation failed
    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    /// World file could not be understood
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tensem operations.
pub type Result<T> = std::result::Result<T, TensemError>;

pub(crate) fn dims_mismatch(expected: &[usize], got: &[usize]) -> TensemError {
    TensemError::DimensionMismatch {
        expected: format!("{:?}", expected),
        got: format!("{:?}", got),
    }
}
