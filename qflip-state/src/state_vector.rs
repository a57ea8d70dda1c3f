//! Statevector representation

use crate::error::{Result, StateError};
use crate::kernels;
use num_complex::Complex64;
use qflip_core::{Gate, MAX_QUBITS};

/// Amplitudes of an n-qubit register
///
/// Holds `2^n` complex amplitudes indexed by basis state, where bit `k` of the
/// index is the value of qubit `k` (qubit 0 is the least-significant bit).
/// Unitary gates keep the sum of squared magnitudes at 1.
///
/// # Example
///
/// ```
/// use qflip_core::{Gate, QubitId};
/// use qflip_state::StateVector;
///
/// let mut state = StateVector::new(2).unwrap();
/// state.apply_gate(&Gate::hadamard(QubitId::new(0))).unwrap();
/// state.apply_gate(&Gate::cnot(QubitId::new(0), QubitId::new(1))).unwrap();
///
/// assert!((state.probability(0) - 0.5).abs() < 1e-12);
/// assert!((state.probability(3) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl StateVector {
    /// Create a new state vector initialized to |0...0⟩
    ///
    /// # Errors
    /// Returns error if `num_qubits` is 0 or above the supported maximum
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(StateError::UnsupportedQubitCount { num_qubits });
        }

        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);

        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Create a state vector from raw amplitude data
    ///
    /// The amplitudes are taken as given; call [`normalize`](Self::normalize)
    /// if they are not already unit-norm.
    ///
    /// # Errors
    /// Returns error if the length is not `2^num_qubits`
    pub fn from_amplitudes(num_qubits: usize, amplitudes: &[Complex64]) -> Result<Self> {
        let mut state = Self::new(num_qubits)?;

        if amplitudes.len() != state.dimension() {
            return Err(StateError::DimensionMismatch {
                expected: state.dimension(),
                actual: amplitudes.len(),
            });
        }

        state.amplitudes.copy_from_slice(amplitudes);
        Ok(state)
    }

    /// Get the number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the state dimension (2^num_qubits)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Get a reference to the state amplitudes
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Born-rule probability of a single basis state
    ///
    /// Returns 0 for indices outside the state.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes.get(index).map_or(0.0, |a| a.norm_sqr())
    }

    /// Probabilities of all basis states, in index order
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Compute the L2 norm of the state vector
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(|a| a.norm_sqr())
            .sum::<f64>()
            .sqrt()
    }

    /// Scale all amplitudes so that the norm equals 1
    ///
    /// A zero vector is left untouched.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 1e-10 {
            let inv_norm = 1.0 / norm;
            for amplitude in &mut self.amplitudes {
                *amplitude *= inv_norm;
            }
        }
    }

    /// Check if the state is normalized (|norm - 1| < epsilon)
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    /// Reset the state to |0...0⟩
    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[0] = Complex64::new(1.0, 0.0);
    }

    /// Apply a gate in place
    ///
    /// # Errors
    /// Returns [`StateError::InvalidQubitIndex`] if the gate's target or
    /// control lies outside this state. The amplitudes are left unchanged
    /// in that case.
    pub fn apply_gate(&mut self, gate: &Gate) -> Result<()> {
        for qubit in gate.qubits() {
            self.check_qubit(qubit.index())?;
        }

        let target = gate.target().index();
        match *gate {
            Gate::Hadamard { .. } => kernels::apply_hadamard(&mut self.amplitudes, target),
            Gate::PauliX { .. } => kernels::apply_pauli_x(&mut self.amplitudes, target),
            Gate::PauliZ { .. } => kernels::apply_pauli_z(&mut self.amplitudes, target),
            Gate::RotationY { theta, .. } => {
                kernels::apply_rotation_y(&mut self.amplitudes, theta, target)
            }
            Gate::CNot { control, .. } => {
                if control.index() == target {
                    return Err(StateError::InvalidQubitIndex {
                        index: target,
                        num_qubits: self.num_qubits,
                    });
                }
                kernels::apply_cnot(&mut self.amplitudes, control.index(), target)
            }
        }
        Ok(())
    }

    #[inline]
    fn check_qubit(&self, index: usize) -> Result<()> {
        if index >= self.num_qubits {
            return Err(StateError::InvalidQubitIndex {
                index,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }
}
