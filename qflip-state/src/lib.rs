//! Statevector simulation and measurement for qflip
//!
//! This crate holds the numeric core of the simulator:
//!
//! - [`StateVector`]: `2^n` complex amplitudes with qubit 0 as the least-significant bit
//! - [`kernels`]: closed-form in-place updates for H, X, Z, RY(θ) and CNOT
//! - [`OutcomeDistribution`]: Born-rule probabilities, renormalized on drift
//! - [`measurement`]: weighted single-shot and multinomial batch sampling
//!
//! # Example
//!
//! ```
//! use qflip_core::{Gate, QubitId};
//! use qflip_state::{measurement, StateVector};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut state = StateVector::new(1).unwrap();
//! state.apply_gate(&Gate::hadamard(QubitId::new(0))).unwrap();
//!
//! let dist = measurement::distribution(&state).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let batch = measurement::sample_batch(&dist, 1000, &mut rng).unwrap();
//! assert_eq!(batch.counts().iter().sum::<usize>(), 1000);
//! ```

pub mod distribution;
pub mod error;
pub mod kernels;
pub mod measurement;
pub mod outcome;
pub mod state_vector;

pub use distribution::{OutcomeDistribution, NORMALIZATION_TOLERANCE};
pub use error::{Result, StateError};
pub use measurement::{sample_batch, sample_individually, sample_one, BatchResult};
pub use outcome::Outcome;
pub use state_vector::StateVector;
