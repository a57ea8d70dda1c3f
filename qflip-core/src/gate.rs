//! Quantum gate descriptions
//!
//! Gates are plain immutable values. They describe *what* to apply and to
//! which qubits; the amplitude update rules live in `qflip-state`.

use crate::QubitId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A unitary gate bound to the qubits it acts on
///
/// # Example
/// ```
/// use qflip_core::{Gate, QubitId};
///
/// let q0 = QubitId::new(0);
/// let q1 = QubitId::new(1);
///
/// let cnot = Gate::cnot(q0, q1);
/// assert_eq!(cnot.name(), "CNOT");
/// assert_eq!(cnot.control(), Some(q0));
/// assert_eq!(cnot.target(), q1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum Gate {
    /// Hadamard: H|0⟩ = (|0⟩ + |1⟩)/√2
    Hadamard { target: QubitId },

    /// Pauli-X (bit flip)
    PauliX { target: QubitId },

    /// Pauli-Z (phase flip on |1⟩)
    PauliZ { target: QubitId },

    /// Rotation about the Y axis by `theta` radians
    RotationY { theta: f64, target: QubitId },

    /// Controlled-NOT: flips `target` where `control` is |1⟩
    #[serde(rename = "cnot")]
    CNot { control: QubitId, target: QubitId },
}

impl Gate {
    #[inline]
    pub const fn hadamard(target: QubitId) -> Self {
        Self::Hadamard { target }
    }

    #[inline]
    pub const fn pauli_x(target: QubitId) -> Self {
        Self::PauliX { target }
    }

    #[inline]
    pub const fn pauli_z(target: QubitId) -> Self {
        Self::PauliZ { target }
    }

    #[inline]
    pub const fn rotation_y(theta: f64, target: QubitId) -> Self {
        Self::RotationY { theta, target }
    }

    #[inline]
    pub const fn cnot(control: QubitId, target: QubitId) -> Self {
        Self::CNot { control, target }
    }

    /// The conventional short name of the gate
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hadamard { .. } => "H",
            Self::PauliX { .. } => "X",
            Self::PauliZ { .. } => "Z",
            Self::RotationY { .. } => "RY",
            Self::CNot { .. } => "CNOT",
        }
    }

    /// The qubit whose amplitudes the gate rewrites
    #[inline]
    pub fn target(&self) -> QubitId {
        match *self {
            Self::Hadamard { target }
            | Self::PauliX { target }
            | Self::PauliZ { target }
            | Self::RotationY { target, .. }
            | Self::CNot { target, .. } => target,
        }
    }

    /// The control qubit, for controlled gates
    #[inline]
    pub fn control(&self) -> Option<QubitId> {
        match *self {
            Self::CNot { control, .. } => Some(control),
            _ => None,
        }
    }

    /// Number of qubits this gate acts on
    #[inline]
    pub fn num_qubits(&self) -> usize {
        if self.control().is_some() {
            2
        } else {
            1
        }
    }

    /// All qubits touched by the gate, control first
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> {
        self.control().into_iter().chain(std::iter::once(self.target()))
    }

    /// Whether this gate is its own inverse
    pub fn is_hermitian(&self) -> bool {
        !matches!(self, Self::RotationY { .. })
    }

    /// Whether the gate only rescales amplitudes without mixing them
    pub fn is_diagonal(&self) -> bool {
        matches!(self, Self::PauliZ { .. })
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RotationY { theta, target } => write!(f, "RY({:.4})({})", theta, target),
            Self::CNot { control, target } => write!(f, "CNOT({}, {})", control, target),
            other => write!(f, "{}({})", other.name(), other.target()),
        }
    }
}
