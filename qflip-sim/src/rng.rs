//! Random source for measurement sampling

use crate::config::{RngMode, SimulatorConfig};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Where measurement randomness comes from
///
/// Simulation is deterministic up to sampling; this type is the single seam
/// through which randomness is injected. It is `Send + Sync`, so one service
/// can serve concurrent requests.
#[derive(Debug)]
pub enum RandomSource {
    /// A new generator per request, optionally derived from a base seed
    PerRequest {
        seed: Option<u64>,
        requests: AtomicU64,
    },

    /// One generator shared by every request
    Shared(Mutex<StdRng>),
}

impl RandomSource {
    /// Build the source described by `config`
    pub fn from_config(config: &SimulatorConfig) -> Self {
        match config.rng_mode {
            RngMode::PerRequest => Self::per_request(config.seed),
            RngMode::Shared => {
                let rng = match config.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                Self::from_rng(rng)
            }
        }
    }

    pub fn per_request(seed: Option<u64>) -> Self {
        Self::PerRequest {
            seed,
            requests: AtomicU64::new(0),
        }
    }

    /// Share an existing generator
    pub fn from_rng(rng: StdRng) -> Self {
        Self::Shared(Mutex::new(rng))
    }

    /// Run `f` with the generator for one request
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        match self {
            Self::PerRequest {
                seed: Some(seed),
                requests,
            } => {
                let request = requests.fetch_add(1, Ordering::Relaxed);
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(request));
                f(&mut rng)
            }
            Self::PerRequest { seed: None, .. } => f(&mut StdRng::from_entropy()),
            Self::Shared(rng) => f(&mut rng.lock()),
        }
    }
}
