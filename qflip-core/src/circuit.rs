//! Quantum circuit representation

use crate::{Gate, QuantumError, QubitId, Result};
use serde::{Deserialize, Serialize};

/// Largest register the simulator supports
pub const MAX_QUBITS: usize = 2;

/// A quantum circuit
///
/// An ordered sequence of gates over a fixed number of qubits. A circuit only
/// describes state preparation; measurement is a separate terminal step.
///
/// Circuits built through [`Circuit::add_gate`] are always valid. Circuits
/// obtained through deserialization are not checked until
/// [`Circuit::validate`] runs, which the simulator does before execution.
///
/// # Example
/// ```
/// use qflip_core::{Circuit, QubitId};
///
/// let mut circuit = Circuit::new(2).unwrap();
/// circuit
///     .h(QubitId::new(0))
///     .and_then(|c| c.cnot(QubitId::new(0), QubitId::new(1)))
///     .unwrap();
/// assert_eq!(circuit.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits
    ///
    /// # Errors
    /// Returns [`QuantumError::UnsupportedQubitCount`] unless
    /// `1 <= num_qubits <= MAX_QUBITS`.
    pub fn new(num_qubits: usize) -> Result<Self> {
        Self::with_capacity(num_qubits, 0)
    }

    /// Create a circuit with pre-allocated capacity
    pub fn with_capacity(num_qubits: usize, capacity: usize) -> Result<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(QuantumError::UnsupportedQubitCount(num_qubits));
        }
        Ok(Self {
            num_qubits,
            gates: Vec::with_capacity(capacity),
        })
    }

    /// Build a circuit from a gate sequence, validating every gate
    pub fn from_gates(num_qubits: usize, gates: impl IntoIterator<Item = Gate>) -> Result<Self> {
        let mut circuit = Self::new(num_qubits)?;
        for gate in gates {
            circuit.add_gate(gate)?;
        }
        Ok(circuit)
    }

    /// Get the number of qubits in the circuit
    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimension of the statevector this circuit acts on (2^n)
    #[inline]
    pub const fn dimension(&self) -> usize {
        1 << self.num_qubits
    }

    /// Get the number of gates in the circuit
    #[inline]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Append a gate
    ///
    /// # Errors
    /// Returns error if any qubit index is out of bounds or if a controlled
    /// gate uses the same qubit as control and target.
    pub fn add_gate(&mut self, gate: Gate) -> Result<&mut Self> {
        self.check_gate(&gate)?;
        self.gates.push(gate);
        Ok(self)
    }

    /// Append a Hadamard gate
    pub fn h(&mut self, target: QubitId) -> Result<&mut Self> {
        self.add_gate(Gate::hadamard(target))
    }

    /// Append a Pauli-X gate
    pub fn x(&mut self, target: QubitId) -> Result<&mut Self> {
        self.add_gate(Gate::pauli_x(target))
    }

    /// Append a Pauli-Z gate
    pub fn z(&mut self, target: QubitId) -> Result<&mut Self> {
        self.add_gate(Gate::pauli_z(target))
    }

    /// Append a Y-rotation by `theta` radians
    pub fn ry(&mut self, theta: f64, target: QubitId) -> Result<&mut Self> {
        self.add_gate(Gate::rotation_y(theta, target))
    }

    /// Append a controlled-NOT gate
    pub fn cnot(&mut self, control: QubitId, target: QubitId) -> Result<&mut Self> {
        self.add_gate(Gate::cnot(control, target))
    }

    /// Iterate over the gates in application order
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.iter()
    }

    /// Get a specific gate by position
    pub fn get_gate(&self, index: usize) -> Option<&Gate> {
        self.gates.get(index)
    }

    /// Validate the circuit
    ///
    /// Checks the qubit count and every gate's qubit indices.
    pub fn validate(&self) -> Result<()> {
        if self.num_qubits == 0 || self.num_qubits > MAX_QUBITS {
            return Err(QuantumError::UnsupportedQubitCount(self.num_qubits));
        }
        self.gates.iter().try_for_each(|gate| self.check_gate(gate))
    }

    fn check_gate(&self, gate: &Gate) -> Result<()> {
        for qubit in gate.qubits() {
            if qubit.index() >= self.num_qubits {
                return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
            }
        }
        if gate.control() == Some(gate.target()) {
            return Err(QuantumError::DuplicateQubit(gate.target()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_creation() {
        let circuit = Circuit::new(2).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.dimension(), 4);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_unsupported_qubit_counts() {
        assert_eq!(
            Circuit::new(0).unwrap_err(),
            QuantumError::UnsupportedQubitCount(0)
        );
        assert_eq!(
            Circuit::new(3).unwrap_err(),
            QuantumError::UnsupportedQubitCount(3)
        );
    }

    #[test]
    fn test_add_gate_chaining() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit
            .x(QubitId::new(1))
            .unwrap()
            .h(QubitId::new(0))
            .unwrap()
            .cnot(QubitId::new(0), QubitId::new(1))
            .unwrap();

        assert_eq!(circuit.len(), 3);
        assert_eq!(circuit.get_gate(0), Some(&Gate::pauli_x(QubitId::new(1))));
        assert_eq!(circuit.get_gate(2).map(Gate::name), Some("CNOT"));
    }

    #[test]
    fn test_invalid_qubit_rejected() {
        let mut circuit = Circuit::new(1).unwrap();
        let err = circuit.h(QubitId::new(1)).unwrap_err();
        assert_eq!(err, QuantumError::invalid_qubit(1, 1));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_cnot_control_out_of_range() {
        let mut circuit = Circuit::new(2).unwrap();
        let err = circuit.cnot(QubitId::new(2), QubitId::new(0)).unwrap_err();
        assert_eq!(err, QuantumError::invalid_qubit(2, 2));
    }

    #[test]
    fn test_cnot_duplicate_qubit() {
        let mut circuit = Circuit::new(2).unwrap();
        let err = circuit.cnot(QubitId::new(1), QubitId::new(1)).unwrap_err();
        assert_eq!(err, QuantumError::DuplicateQubit(QubitId::new(1)));
    }

    #[test]
    fn test_from_gates() {
        let gates = [Gate::hadamard(QubitId::new(0)), Gate::hadamard(QubitId::new(1))];
        let circuit = Circuit::from_gates(2, gates).unwrap();
        assert_eq!(circuit.len(), 2);
        assert!(circuit.validate().is_ok());
    }
}
