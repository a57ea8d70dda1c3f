//! Error types for statevector and measurement operations

use thiserror::Error;

/// Errors that can occur during statevector operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Invalid qubit index
    #[error("Invalid qubit index {index} for {num_qubits}-qubit state")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// Unsupported register size
    #[error(
        "Unsupported {num_qubits}-qubit state, expected between 1 and {max}",
        max = qflip_core::MAX_QUBITS
    )]
    UnsupportedQubitCount { num_qubits: usize },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Shot count below one
    #[error("Invalid shot count {shots}, at least one shot is required")]
    InvalidShotCount { shots: usize },

    /// Probabilities cannot be used as sampling weights
    #[error("Invalid outcome distribution: {0}")]
    InvalidDistribution(String),

    /// Bitstring that does not name a basis state
    #[error("Invalid outcome bitstring '{0}'")]
    InvalidOutcome(String),
}

/// Result type for statevector operations
pub type Result<T> = std::result::Result<T, StateError>;
