//! Born-rule outcome distributions

use crate::error::{Result, StateError};
use crate::outcome::Outcome;
use crate::state_vector::StateVector;
use qflip_core::MAX_QUBITS;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::warn;

/// Largest deviation of the probability total from 1 accepted as-is
pub const NORMALIZATION_TOLERANCE: f64 = 1e-6;

/// Probability of every outcome of an n-qubit register
///
/// Immutable once built. Probabilities are stored in basis-index order and
/// always sum to 1 within [`NORMALIZATION_TOLERANCE`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeDistribution {
    num_qubits: usize,
    probabilities: Vec<f64>,
}

impl OutcomeDistribution {
    /// Derive the distribution of a statevector (squared amplitude magnitudes)
    pub fn from_state(state: &StateVector) -> Result<Self> {
        Self::from_state_with_tolerance(state, NORMALIZATION_TOLERANCE)
    }

    /// Derive the distribution, renormalizing if the total drifts past `tolerance`
    pub fn from_state_with_tolerance(state: &StateVector, tolerance: f64) -> Result<Self> {
        Self::from_probabilities(state.num_qubits(), state.probabilities(), tolerance)
    }

    /// Build a distribution from probabilities in basis-index order
    ///
    /// # Errors
    /// Returns error if the length is not `2^num_qubits`, if any entry is
    /// negative or not finite, or if everything is zero.
    pub fn from_probabilities(
        num_qubits: usize,
        mut probabilities: Vec<f64>,
        tolerance: f64,
    ) -> Result<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(StateError::UnsupportedQubitCount { num_qubits });
        }
        if probabilities.len() != 1 << num_qubits {
            return Err(StateError::DimensionMismatch {
                expected: 1 << num_qubits,
                actual: probabilities.len(),
            });
        }
        if let Some(p) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(StateError::InvalidDistribution(format!(
                "probability {p} is not a finite non-negative number"
            )));
        }

        let total: f64 = probabilities.iter().sum();
        if total <= 0.0 {
            return Err(StateError::InvalidDistribution(
                "probabilities sum to zero".to_string(),
            ));
        }
        if (total - 1.0).abs() > tolerance {
            warn!(total, num_qubits, "renormalizing outcome distribution");
            probabilities.iter_mut().for_each(|p| *p /= total);
        }

        Ok(Self {
            num_qubits,
            probabilities,
        })
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Probabilities in basis-index order
    #[inline]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Probability of one outcome (0 if it belongs to a different register size)
    pub fn probability(&self, outcome: &Outcome) -> f64 {
        if outcome.num_qubits() != self.num_qubits {
            return 0.0;
        }
        self.probabilities[outcome.index()]
    }

    /// Probability of a presentation-order bitstring such as `"01"`
    pub fn probability_of(&self, bits: &str) -> Result<f64> {
        let outcome = Outcome::from_bitstring(bits)?;
        if outcome.num_qubits() != self.num_qubits {
            return Err(StateError::InvalidOutcome(bits.to_string()));
        }
        Ok(self.probability(&outcome))
    }

    /// Sum of all probabilities
    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Iterate over `(outcome, probability)` in basis-index order
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, f64)> + '_ {
        Outcome::all(self.num_qubits).zip(self.probabilities.iter().copied())
    }

    /// Probabilities keyed by bitstring
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.iter().map(|(o, p)| (o.to_string(), p)).collect()
    }
}

impl Serialize for OutcomeDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let map = self.to_map();
        let mut ser = serializer.serialize_map(Some(map.len()))?;
        for (bits, p) in &map {
            ser.serialize_entry(bits, p)?;
        }
        ser.end()
    }
}
