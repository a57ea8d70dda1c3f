//! Circuit engine

use qflip_core::Circuit;
use qflip_state::{OutcomeDistribution, StateVector};
use std::time::Instant;
use tracing::{debug, trace};

use crate::{config::SimulatorConfig, error::Result};

/// Executes circuits against a fresh statevector
///
/// Execution is deterministic: the same circuit always yields the same
/// amplitudes. Randomness only enters later, when the resulting distribution
/// is sampled.
///
/// # Example
///
/// ```
/// use qflip_core::{Circuit, QubitId};
/// use qflip_sim::{Simulator, SimulatorConfig};
///
/// let simulator = Simulator::new(SimulatorConfig::default());
///
/// let mut circuit = Circuit::new(1).unwrap();
/// circuit.h(QubitId::new(0)).unwrap();
///
/// let state = simulator.run(&circuit).unwrap();
/// assert!((state.probability(1) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a new simulator with the given configuration
    pub fn new(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Get the simulator configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run a quantum circuit simulation
    ///
    /// Applies every gate in order to `|0...0⟩` over the circuit's qubits.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::InvalidQubitIndex`](crate::SimulatorError::InvalidQubitIndex)
    /// if a gate addresses a qubit outside the circuit.
    pub fn run(&self, circuit: &Circuit) -> Result<StateVector> {
        let start = Instant::now();
        circuit.validate()?;

        let mut state = StateVector::new(circuit.num_qubits())?;
        for (position, gate) in circuit.gates().enumerate() {
            trace!(position, %gate, "applying gate");
            state.apply_gate(gate)?;
        }

        debug!(
            num_qubits = circuit.num_qubits(),
            gates = circuit.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "circuit executed"
        );
        Ok(state)
    }

    /// Run a circuit and derive its Born-rule outcome distribution
    pub fn distribution(&self, circuit: &Circuit) -> Result<OutcomeDistribution> {
        let state = self.run(circuit)?;
        let distribution = OutcomeDistribution::from_state_with_tolerance(
            &state,
            self.config.normalization_tolerance,
        )?;
        Ok(distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulatorError;
    use approx::assert_relative_eq;
    use qflip_core::QubitId;

    #[test]
    fn test_empty_circuit_is_ground_state() {
        let simulator = Simulator::default();
        let state = simulator.run(&Circuit::new(2).unwrap()).unwrap();
        assert_eq!(state, StateVector::new(2).unwrap());
    }

    #[test]
    fn test_run_is_deterministic() {
        let simulator = Simulator::default();
        let mut circuit = Circuit::new(2).unwrap();
        circuit
            .ry(0.7, QubitId::new(1))
            .unwrap()
            .h(QubitId::new(0))
            .unwrap()
            .cnot(QubitId::new(1), QubitId::new(0))
            .unwrap();

        let a = simulator.run(&circuit).unwrap();
        let b = simulator.run(&circuit).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_qubit_index_from_deserialized_circuit() {
        let circuit: Circuit =
            serde_json::from_str(r#"{"num_qubits":1,"gates":[{"gate":"pauli_x","target":3}]}"#)
                .unwrap();

        let err = Simulator::default().run(&circuit).unwrap_err();
        assert_eq!(
            err,
            SimulatorError::InvalidQubitIndex {
                index: 3,
                num_qubits: 1
            }
        );
    }

    #[test]
    fn test_distribution_of_bell_pair() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit
            .h(QubitId::new(0))
            .unwrap()
            .cnot(QubitId::new(0), QubitId::new(1))
            .unwrap();

        let dist = Simulator::default().distribution(&circuit).unwrap();
        assert_relative_eq!(dist.probability_of("00").unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(dist.probability_of("11").unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(dist.total(), 1.0, epsilon = 1e-12);
    }
}
