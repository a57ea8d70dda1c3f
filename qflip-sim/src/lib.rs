//! Circuit engine, demonstration scenarios and measurement service
//!
//! This crate sits on top of [`qflip_core`] circuits and [`qflip_state`]
//! statevectors:
//!
//! - **Circuit engine**: [`Simulator`] runs a circuit on a fresh `|0...0⟩` state
//! - **Scenarios**: coin flips, the four Bell states and five single-qubit
//!   demo states measured in the Z or X basis
//! - **Batch statistics**: zero-filled counts and rounded percentages
//! - **Service**: [`QuantumService`], the entry point a transport layer calls,
//!   returning serializable result records
//!
//! Randomness enters only through the service's [`RandomSource`], which is
//! either one generator per request or one shared generator, as configured.
//!
//! # Example
//!
//! ```
//! use qflip_sim::{BellState, QuantumService, SimulatorConfig};
//!
//! let service = QuantumService::new(SimulatorConfig::default()).unwrap();
//!
//! let pair = service.run_bell_state(BellState::PsiPlus).unwrap();
//! assert!(pair.result == "01" || pair.result == "10");
//!
//! let batch = service.run_bell_state_batch(BellState::PhiPlus, 1000).unwrap();
//! assert_eq!(batch.counts["01"] + batch.counts["10"], 0);
//! ```

pub mod config;
pub mod error;
pub mod result;
pub mod rng;
pub mod scenario;
pub mod service;
pub mod simulator;
pub mod statistics;

pub use config::{RngMode, SimulatorConfig};
pub use error::{Result, SimulatorError};
pub use result::{
    BellBatch, BellMeasurement, CoinFlip, CoinFlipBatch, DoubleCoinFlip, DoubleCoinFlipBatch,
    MeasurementBatch, MeasurementOutcome,
};
pub use rng::RandomSource;
pub use scenario::{Basis, BellState, MeasurementState, OutcomeLabels, ScenarioCircuit};
pub use service::QuantumService;
pub use simulator::Simulator;
pub use statistics::{summarize, BatchSummary};
