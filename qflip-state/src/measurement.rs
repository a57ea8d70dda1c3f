//! Computational basis measurement and shot sampling
//!
//! This module is the only place randomness enters the simulator:
//! - [`sample_one`] draws a single weighted outcome
//! - [`sample_batch`] draws all shots at once as one multinomial sample
//!
//! Both take the random source as an argument so callers can seed or share it.

use crate::distribution::OutcomeDistribution;
use crate::error::{Result, StateError};
use crate::outcome::Outcome;
use crate::state_vector::StateVector;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use rand_distr::Binomial;
use std::collections::BTreeMap;
use tracing::trace;

/// Born-rule distribution of a statevector
pub fn distribution(state: &StateVector) -> Result<OutcomeDistribution> {
    OutcomeDistribution::from_state(state)
}

/// Draw a single outcome weighted by `distribution`
pub fn sample_one<R: Rng + ?Sized>(
    distribution: &OutcomeDistribution,
    rng: &mut R,
) -> Result<Outcome> {
    let weights = WeightedIndex::new(distribution.probabilities())
        .map_err(|e| StateError::InvalidDistribution(e.to_string()))?;
    let index = weights.sample(rng);
    Outcome::new(index, distribution.num_qubits())
}

/// Draw `shots` independent outcomes in one multinomial sample
///
/// The multinomial is drawn as a chain of conditional binomials: outcome `i`
/// receives `Binomial(remaining, p_i / mass_left)` shots. The last outcome
/// with non-zero probability takes whatever remains, so zero-probability
/// outcomes never receive counts.
///
/// # Errors
/// Returns [`StateError::InvalidShotCount`] if `shots` is 0.
pub fn sample_batch<R: Rng + ?Sized>(
    distribution: &OutcomeDistribution,
    shots: usize,
    rng: &mut R,
) -> Result<BatchResult> {
    if shots == 0 {
        return Err(StateError::InvalidShotCount { shots });
    }

    let probabilities = distribution.probabilities();
    let last_supported = probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .ok_or_else(|| {
            StateError::InvalidDistribution("no outcome has positive probability".into())
        })?;

    let mut result = BatchResult::new(distribution.num_qubits(), shots);
    let mut remaining = shots as u64;
    let mut mass_left = 1.0f64;

    for (index, &p) in probabilities.iter().enumerate().take(last_supported + 1) {
        if remaining == 0 {
            break;
        }

        let drawn = if index == last_supported {
            remaining
        } else if p <= 0.0 {
            0
        } else {
            let conditional = (p / mass_left).clamp(0.0, 1.0);
            Binomial::new(remaining, conditional)
                .map_err(|e| StateError::InvalidDistribution(e.to_string()))?
                .sample(rng)
        };

        result.counts[index] = drawn as usize;
        remaining -= drawn;
        mass_left -= p;
    }

    trace!(shots, counts = ?result.counts, "sampled batch");
    Ok(result)
}

/// Draw `shots` outcomes one at a time with [`sample_one`]
///
/// Statistically equivalent to [`sample_batch`] but linear in the shot count.
pub fn sample_individually<R: Rng + ?Sized>(
    distribution: &OutcomeDistribution,
    shots: usize,
    rng: &mut R,
) -> Result<BatchResult> {
    if shots == 0 {
        return Err(StateError::InvalidShotCount { shots });
    }

    let mut result = BatchResult::new(distribution.num_qubits(), shots);
    for _ in 0..shots {
        result.add_outcome(&sample_one(distribution, rng)?);
    }
    Ok(result)
}

/// Counts from multiple measurement shots
///
/// Counts are kept for every outcome of the register, observed or not, and
/// always sum to the shot count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    num_qubits: usize,
    counts: Vec<usize>,
    shots: usize,
}

impl BatchResult {
    fn new(num_qubits: usize, shots: usize) -> Self {
        Self {
            num_qubits,
            counts: vec![0; 1 << num_qubits],
            shots,
        }
    }

    /// Tally a multiset of outcomes
    ///
    /// # Errors
    /// Returns error if an outcome belongs to a different register size
    pub fn from_outcomes<'a>(
        num_qubits: usize,
        outcomes: impl IntoIterator<Item = &'a Outcome>,
    ) -> Result<Self> {
        let mut result = Self::new(num_qubits, 0);
        for outcome in outcomes {
            if outcome.num_qubits() != num_qubits {
                return Err(StateError::DimensionMismatch {
                    expected: num_qubits,
                    actual: outcome.num_qubits(),
                });
            }
            result.add_outcome(outcome);
            result.shots += 1;
        }
        Ok(result)
    }

    fn add_outcome(&mut self, outcome: &Outcome) {
        self.counts[outcome.index()] += 1;
    }

    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Total number of shots
    #[inline]
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Counts in basis-index order
    #[inline]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Count for one outcome
    pub fn count(&self, outcome: &Outcome) -> usize {
        self.counts.get(outcome.index()).copied().unwrap_or(0)
    }

    /// Observed frequency of one outcome (count / shots)
    pub fn frequency(&self, outcome: &Outcome) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(outcome) as f64 / self.shots as f64
    }

    /// Iterate over `(outcome, count)` in basis-index order
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, usize)> + '_ {
        Outcome::all(self.num_qubits).zip(self.counts.iter().copied())
    }

    /// Most frequently observed outcome
    pub fn most_common(&self) -> Option<(Outcome, usize)> {
        self.iter().filter(|(_, c)| *c > 0).max_by_key(|(_, c)| *c)
    }

    /// Counts keyed by bitstring
    pub fn to_bitstring_counts(&self) -> BTreeMap<String, usize> {
        self.iter().map(|(o, c)| (o.to_string(), c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dist(num_qubits: usize, probabilities: Vec<f64>) -> OutcomeDistribution {
        OutcomeDistribution::from_probabilities(num_qubits, probabilities, 1e-6).unwrap()
    }

    #[test]
    fn test_sample_one_definite_state() {
        let mut rng = StdRng::seed_from_u64(42);
        let d = dist(2, vec![0.0, 0.0, 1.0, 0.0]);
        for _ in 0..50 {
            assert_eq!(sample_one(&d, &mut rng).unwrap().to_string(), "01");
        }
    }

    #[test]
    fn test_sample_one_uses_both_outcomes() {
        let mut rng = StdRng::seed_from_u64(7);
        let d = dist(1, vec![0.5, 0.5]);
        let draws: Vec<_> = (0..200).map(|_| sample_one(&d, &mut rng).unwrap().index()).collect();
        assert!(draws.contains(&0));
        assert!(draws.contains(&1));
    }

    #[test]
    fn test_batch_counts_sum_to_shots() {
        let mut rng = StdRng::seed_from_u64(1);
        let d = dist(2, vec![0.1, 0.2, 0.3, 0.4]);
        let batch = sample_batch(&d, 10_000, &mut rng).unwrap();

        assert_eq!(batch.shots(), 10_000);
        assert_eq!(batch.counts().iter().sum::<usize>(), 10_000);
    }

    #[test]
    fn test_batch_zero_probability_never_counted() {
        let mut rng = StdRng::seed_from_u64(3);
        let d = dist(2, vec![0.0, 0.5, 0.5, 0.0]);
        for _ in 0..20 {
            let batch = sample_batch(&d, 997, &mut rng).unwrap();
            assert_eq!(batch.counts()[0], 0);
            assert_eq!(batch.counts()[3], 0);
            assert_eq!(batch.counts()[1] + batch.counts()[2], 997);
        }
    }

    #[test]
    fn test_batch_is_reproducible_with_seed() {
        let d = dist(1, vec![0.75, 0.25]);
        let a = sample_batch(&d, 10_000, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = sample_batch(&d, 10_000, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_batch_frequencies_converge() {
        let mut rng = StdRng::seed_from_u64(2024);
        let d = dist(2, vec![0.5, 0.3, 0.15, 0.05]);
        let batch = sample_batch(&d, 10_000, &mut rng).unwrap();

        for (outcome, p) in d.iter() {
            let freq = batch.frequency(&outcome);
            assert!(
                (freq - p).abs() < 0.02,
                "outcome {} frequency {} too far from {}",
                outcome,
                freq,
                p
            );
        }
    }

    #[test]
    fn test_individual_sampling_matches_distribution() {
        let mut rng = StdRng::seed_from_u64(5);
        let d = dist(1, vec![0.25, 0.75]);
        let batch = sample_individually(&d, 10_000, &mut rng).unwrap();

        assert_eq!(batch.shots(), 10_000);
        assert_relative_eq!(batch.frequency(&Outcome::new(1, 1).unwrap()), 0.75, epsilon = 0.02);
    }

    #[test]
    fn test_zero_shots_rejected() {
        let d = dist(1, vec![0.5, 0.5]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            sample_batch(&d, 0, &mut rng).unwrap_err(),
            StateError::InvalidShotCount { shots: 0 }
        );
        assert!(sample_individually(&d, 0, &mut rng).is_err());
    }

    #[test]
    fn test_from_outcomes() {
        let outcomes: Vec<Outcome> = ["00", "11", "11", "01"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let batch = BatchResult::from_outcomes(2, &outcomes).unwrap();

        assert_eq!(batch.shots(), 4);
        let counts = batch.to_bitstring_counts();
        assert_eq!(counts["11"], 2);
        assert_eq!(counts["10"], 0);
        assert_eq!(
            batch.most_common().map(|(o, c)| (o.to_string(), c)),
            Some(("11".to_string(), 2))
        );
    }

    #[test]
    fn test_from_outcomes_register_mismatch() {
        let outcomes = vec![Outcome::new(0, 1).unwrap()];
        assert!(BatchResult::from_outcomes(2, &outcomes).is_err());
    }
}
