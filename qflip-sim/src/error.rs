//! Error types for the simulator

use qflip_core::QuantumError;
use qflip_state::StateError;
use thiserror::Error;

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Errors that can occur during simulation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulatorError {
    /// A gate references a qubit outside the circuit
    #[error("Invalid qubit index {index}: circuit has {num_qubits} qubits")]
    InvalidQubitIndex { index: usize, num_qubits: usize },

    /// Caller supplied an unrecognized scenario, state or basis name
    #[error("Unknown {field} '{value}', expected one of: {}", .expected.join(", "))]
    UnknownParameter {
        field: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    /// Shot count below one
    #[error("Invalid shot count {shots}, at least one shot is required")]
    InvalidShotCount { shots: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Circuit is malformed in a way other than qubit indexing
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(#[source] QuantumError),

    /// Statevector or sampling failure
    #[error("State error: {0}")]
    State(#[source] StateError),
}

impl SimulatorError {
    /// Create an unknown parameter error
    pub fn unknown_parameter(
        field: &'static str,
        value: impl Into<String>,
        expected: &'static [&'static str],
    ) -> Self {
        Self::UnknownParameter {
            field,
            value: value.into(),
            expected,
        }
    }

    /// Whether the error stems from caller input rather than a defect
    ///
    /// Transport layers should answer these with a client error status.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownParameter { .. } | Self::InvalidShotCount { .. }
        )
    }
}

impl From<QuantumError> for SimulatorError {
    fn from(err: QuantumError) -> Self {
        match err {
            QuantumError::InvalidQubitIndex { index, num_qubits } => {
                Self::InvalidQubitIndex { index, num_qubits }
            }
            other => Self::InvalidCircuit(other),
        }
    }
}

impl From<StateError> for SimulatorError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::InvalidQubitIndex { index, num_qubits } => {
                Self::InvalidQubitIndex { index, num_qubits }
            }
            StateError::InvalidShotCount { shots } => Self::InvalidShotCount { shots },
            other => Self::State(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qflip_core::QubitId;

    #[test]
    fn test_unknown_parameter_message() {
        let err = SimulatorError::unknown_parameter("basis", "y", &["z", "x"]);
        assert_eq!(err.to_string(), "Unknown basis 'y', expected one of: z, x");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_qubit_index_errors_unify() {
        let from_core: SimulatorError = QuantumError::invalid_qubit(2, 1).into();
        let from_state: SimulatorError = StateError::InvalidQubitIndex {
            index: 2,
            num_qubits: 1,
        }
        .into();
        assert_eq!(from_core, from_state);
        assert!(!from_core.is_client_error());
    }

    #[test]
    fn test_shot_count_error_unifies() {
        let err: SimulatorError = StateError::InvalidShotCount { shots: 0 }.into();
        assert_eq!(err, SimulatorError::InvalidShotCount { shots: 0 });
        assert!(err.is_client_error());
    }

    #[test]
    fn test_other_errors_wrapped() {
        let err: SimulatorError = QuantumError::DuplicateQubit(QubitId::new(0)).into();
        assert!(matches!(err, SimulatorError::InvalidCircuit(_)));
        assert!(err.to_string().contains("Duplicate qubit q0"));
    }
}
