//! Demonstration service
//!
//! [`QuantumService`] is what a transport layer calls. Every operation builds
//! a scenario circuit, simulates it once, and samples the resulting
//! distribution through the configured [`RandomSource`]. Nothing else is
//! kept between calls.

use crate::config::SimulatorConfig;
use crate::error::Result;
use crate::result::{
    BellBatch, BellMeasurement, CoinFlip, CoinFlipBatch, DoubleCoinFlip, DoubleCoinFlipBatch,
    MeasurementBatch, MeasurementOutcome,
};
use crate::rng::RandomSource;
use crate::scenario::{self, Basis, BellState, MeasurementState, ScenarioCircuit};
use crate::simulator::Simulator;
use crate::statistics::{summarize, BatchSummary};
use qflip_state::{sample_batch, sample_one, Outcome, OutcomeDistribution};
use tracing::debug;

/// Coin-flip, Bell-state and measurement demonstrations
///
/// # Example
///
/// ```
/// use qflip_sim::{QuantumService, SimulatorConfig};
///
/// let service = QuantumService::new(SimulatorConfig::deterministic(7)).unwrap();
/// let batch = service.run_single_coin_flip_batch(1000).unwrap();
/// assert_eq!(batch.zeros + batch.ones, 1000);
/// ```
#[derive(Debug)]
pub struct QuantumService {
    simulator: Simulator,
    rng: RandomSource,
}

impl QuantumService {
    /// Create a service from a validated configuration
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        let rng = RandomSource::from_config(&config);
        Ok(Self {
            simulator: Simulator::new(config),
            rng,
        })
    }

    /// Replace the random source, e.g. with a pre-seeded generator
    pub fn with_random_source(mut self, rng: RandomSource) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &SimulatorConfig {
        self.simulator.config()
    }

    /// Clamp a caller-supplied shot count to `[1, max_shots]`
    pub fn clamp_shots(&self, requested: i64) -> usize {
        self.config().clamp_shots(requested)
    }

    fn measure_once(&self, scenario: &ScenarioCircuit) -> Result<(Outcome, OutcomeDistribution)> {
        let distribution = self.simulator.distribution(scenario.circuit())?;
        let outcome = self.rng.with_rng(|rng| sample_one(&distribution, rng))?;
        Ok((outcome, distribution))
    }

    fn measure_batch(&self, scenario: &ScenarioCircuit, shots: usize) -> Result<BatchSummary> {
        let distribution = self.simulator.distribution(scenario.circuit())?;
        let batch = self.rng.with_rng(|rng| sample_batch(&distribution, shots, rng))?;
        summarize(&batch, shots)
    }

    /// Flip one quantum coin
    pub fn run_single_coin_flip(&self) -> Result<CoinFlip> {
        let (outcome, _) = self.measure_once(&scenario::single_coin_flip()?)?;
        debug!(%outcome, "single coin flip");
        Ok(CoinFlip::new(&outcome))
    }

    /// Flip one quantum coin `shots` times
    pub fn run_single_coin_flip_batch(&self, shots: usize) -> Result<CoinFlipBatch> {
        let summary = self.measure_batch(&scenario::single_coin_flip()?, shots)?;
        Ok(CoinFlipBatch::from_summary(&summary))
    }

    /// Flip two independent quantum coins
    pub fn run_double_coin_flip(&self) -> Result<DoubleCoinFlip> {
        let (outcome, _) = self.measure_once(&scenario::double_coin_flip()?)?;
        debug!(%outcome, "double coin flip");
        Ok(DoubleCoinFlip::new(&outcome))
    }

    /// Flip two independent quantum coins `shots` times
    pub fn run_double_coin_flip_batch(&self, shots: usize) -> Result<DoubleCoinFlipBatch> {
        let scenario = scenario::double_coin_flip()?;
        let summary = self.measure_batch(&scenario, shots)?;
        Ok(DoubleCoinFlipBatch::new(summary, scenario.labels()))
    }

    /// Prepare and measure one Bell pair
    pub fn run_bell_state(&self, which: BellState) -> Result<BellMeasurement> {
        let (outcome, _) = self.measure_once(&scenario::bell_state(which)?)?;
        debug!(state = %which, %outcome, "bell measurement");
        Ok(BellMeasurement::new(which, &outcome))
    }

    /// Prepare and measure `shots` Bell pairs
    pub fn run_bell_state_batch(&self, which: BellState, shots: usize) -> Result<BellBatch> {
        let summary = self.measure_batch(&scenario::bell_state(which)?, shots)?;
        Ok(BellBatch::new(which, summary, &which.expected_distribution()?))
    }

    /// Theoretical distribution of a Bell state, without simulation
    pub fn expected_distribution(which: BellState) -> Result<OutcomeDistribution> {
        which.expected_distribution()
    }

    /// Prepare a demo state and measure it once in `basis`
    pub fn run_measurement(
        &self,
        state: MeasurementState,
        basis: Basis,
    ) -> Result<MeasurementOutcome> {
        let scenario = scenario::measurement_demo(state, basis)?;
        let (outcome, distribution) = self.measure_once(&scenario)?;
        debug!(%state, %basis, %outcome, "measurement demo");
        Ok(MeasurementOutcome::new(state, basis, &outcome, &distribution))
    }

    /// Prepare a demo state and measure it `shots` times in `basis`
    pub fn run_measurement_batch(
        &self,
        state: MeasurementState,
        basis: Basis,
        shots: usize,
    ) -> Result<MeasurementBatch> {
        let summary = self.measure_batch(&scenario::measurement_demo(state, basis)?, shots)?;
        Ok(MeasurementBatch::new(
            state,
            basis,
            summary,
            &state.expected_distribution(basis)?,
        ))
    }
}
