//! Quantum coin flips, Bell states and measurement demos
//!
//! Umbrella crate over the qflip workspace plus the `qflip` command-line tool.
//!
//! ```bash
//! # One fair quantum coin
//! qflip coin
//!
//! # 10,000 shots of the Ψ⁻ Bell state, reproducibly
//! qflip --seed 7 bell psi_minus --shots 10000
//!
//! # The 75/25 demo state measured in the X basis
//! qflip measure biased_0 --basis x --shots 500
//!
//! # Theoretical Bell distribution, no simulation
//! qflip expected phi_plus
//! ```

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

pub use qflip_core::{Circuit, Gate, QuantumError, QubitId, MAX_QUBITS};
pub use qflip_sim::{
    Basis, BatchSummary, BellState, MeasurementState, QuantumService, RandomSource, RngMode,
    Simulator, SimulatorConfig, SimulatorError,
};
pub use qflip_state::{BatchResult, Outcome, OutcomeDistribution, StateError, StateVector};

/// qflip command line interface
#[derive(Parser, Debug)]
#[command(name = "qflip")]
#[command(author, version, about = "Quantum coin flips, Bell states and measurement demos")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Seed the random source for reproducible output
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Share one generator across every request instead of one per request
    #[arg(long, global = true)]
    pub shared_rng: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flip one quantum coin
    Coin {
        /// Run a batch of this many shots, clamped to [1, 10000]
        #[arg(long, allow_negative_numbers = true)]
        shots: Option<i64>,
    },

    /// Flip two independent quantum coins
    Double {
        /// Run a batch of this many shots, clamped to [1, 10000]
        #[arg(long, allow_negative_numbers = true)]
        shots: Option<i64>,
    },

    /// Prepare and measure a Bell pair
    Bell {
        /// phi_plus, psi_plus, phi_minus or psi_minus
        state: BellState,

        /// Run a batch of this many shots, clamped to [1, 10000]
        #[arg(long, allow_negative_numbers = true)]
        shots: Option<i64>,
    },

    /// Prepare a single-qubit demo state and measure it
    Measure {
        /// equal, biased_0, biased_1, definite_0 or definite_1
        state: MeasurementState,

        /// Measurement basis
        #[arg(long, default_value_t = Basis::Z)]
        basis: Basis,

        /// Run a batch of this many shots, clamped to [1, 10000]
        #[arg(long, allow_negative_numbers = true)]
        shots: Option<i64>,
    },

    /// Print the theoretical distribution of a Bell state
    Expected {
        /// phi_plus, psi_plus, phi_minus or psi_minus
        state: BellState,
    },
}

impl Cli {
    /// Simulator configuration selected by the global flags
    pub fn config(&self) -> SimulatorConfig {
        let mode = if self.shared_rng {
            RngMode::Shared
        } else {
            RngMode::PerRequest
        };
        SimulatorConfig {
            seed: self.seed,
            rng_mode: mode,
            ..Default::default()
        }
    }
}

/// Execute a command and return its JSON payload
pub fn execute(cli: &Cli) -> anyhow::Result<Value> {
    let service = QuantumService::new(cli.config())?;

    let value = match &cli.command {
        Commands::Coin { shots: None } => serde_json::to_value(service.run_single_coin_flip()?)?,
        Commands::Coin { shots: Some(n) } => {
            let shots = service.clamp_shots(*n);
            serde_json::to_value(service.run_single_coin_flip_batch(shots)?)?
        }
        Commands::Double { shots: None } => serde_json::to_value(service.run_double_coin_flip()?)?,
        Commands::Double { shots: Some(n) } => {
            let shots = service.clamp_shots(*n);
            serde_json::to_value(service.run_double_coin_flip_batch(shots)?)?
        }
        Commands::Bell { state, shots: None } => {
            serde_json::to_value(service.run_bell_state(*state)?)?
        }
        Commands::Bell {
            state,
            shots: Some(n),
        } => {
            let shots = service.clamp_shots(*n);
            serde_json::to_value(service.run_bell_state_batch(*state, shots)?)?
        }
        Commands::Measure {
            state,
            basis,
            shots: None,
        } => serde_json::to_value(service.run_measurement(*state, *basis)?)?,
        Commands::Measure {
            state,
            basis,
            shots: Some(n),
        } => {
            let shots = service.clamp_shots(*n);
            serde_json::to_value(service.run_measurement_batch(*state, *basis, shots)?)?
        }
        Commands::Expected { state } => {
            let expected = QuantumService::expected_distribution(*state)?;
            json!({
                "state": state,
                "description": state.description(),
                "expected": expected,
            })
        }
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Value {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        execute(&cli).unwrap()
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["qflip", "coin", "--seed", "3", "--shared-rng"]).unwrap();
        let config = cli.config();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.rng_mode, RngMode::Shared);
    }

    #[test]
    fn test_unknown_state_rejected() {
        assert!(Cli::try_parse_from(["qflip", "bell", "phi_plus_typo"]).is_err());
        assert!(Cli::try_parse_from(["qflip", "measure", "equal", "--basis", "y"]).is_err());
    }

    #[test]
    fn test_coin_batch_clamps_shots() {
        let value = run(&["qflip", "--seed", "1", "coin", "--shots", "-5"]);
        assert_eq!(value["total_shots"], 1);

        let value = run(&["qflip", "--seed", "1", "coin", "--shots", "20000"]);
        assert_eq!(value["total_shots"], 10_000);
    }

    #[test]
    fn test_measure_defaults_to_z_basis() {
        let value = run(&["qflip", "measure", "definite_1"]);
        assert_eq!(value["basis"], "z");
        assert_eq!(value["result"], 1);
    }

    #[test]
    fn test_expected_payload() {
        let value = run(&["qflip", "expected", "psi_plus"]);
        assert_eq!(value["state"], "psi_plus");
        assert_eq!(value["expected"]["01"], 0.5);
        assert_eq!(value["expected"]["00"], 0.0);
    }

    #[test]
    fn test_seeded_runs_match() {
        let args = ["qflip", "--seed", "11", "double", "--shots", "1000"];
        assert_eq!(run(&args), run(&args));
    }
}
