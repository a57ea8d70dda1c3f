//! Core types for the qflip simulator
//!
//! This crate provides the pure-data description of a quantum circuit:
//! - [`QubitId`]: Type-safe qubit addressing
//! - [`Gate`]: Immutable gate descriptions (H, X, Z, RY(θ), CNOT)
//! - [`Circuit`]: A qubit count plus an ordered gate sequence
//!
//! Nothing here holds simulation state. Circuits are executed by `qflip-sim`
//! against statevectors from `qflip-state`.
//!
//! # Example
//! ```
//! use qflip_core::{Circuit, Gate, QubitId};
//!
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit.add_gate(Gate::hadamard(QubitId::new(0))).unwrap();
//! circuit.add_gate(Gate::cnot(QubitId::new(0), QubitId::new(1))).unwrap();
//! assert_eq!(circuit.len(), 2);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;

// Re-exports for convenience
pub use circuit::{Circuit, MAX_QUBITS};
pub use error::QuantumError;
pub use gate::Gate;
pub use qubit::QubitId;

/// Type alias for results in qflip-core
pub type Result<T> = std::result::Result<T, QuantumError>;
