//! Error types for circuit construction

use crate::QubitId;
use thiserror::Error;

/// Errors that can occur while building a circuit
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuantumError {
    /// A gate references a qubit outside the circuit
    #[error("Invalid qubit index {index}: circuit has only {num_qubits} qubits")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// Circuit qubit count outside the supported range
    #[error("Unsupported qubit count {0}: expected between 1 and {max}", max = crate::MAX_QUBITS)]
    UnsupportedQubitCount(usize),

    /// Control and target of a two-qubit gate coincide
    #[error("Duplicate qubit {0} in gate operation")]
    DuplicateQubit(QubitId),
}

impl QuantumError {
    /// Create an invalid qubit index error
    pub fn invalid_qubit(index: usize, num_qubits: usize) -> Self {
        Self::InvalidQubitIndex { index, num_qubits }
    }
}
